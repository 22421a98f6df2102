//! Pixel-sensor platformer physics: collision masks, body probes, and a
//! tick-stepped player body with locomotion states.

pub mod collision;
pub mod content;
pub mod debug;
pub mod movement;
pub mod sensors;

#[cfg(test)]
mod test_support;
