//! Sensors domain: probes that turn level geometry into contact facts.

mod array;
mod sensor;

#[cfg(test)]
mod tests;

pub use array::{ContactFacts, FloorContact, ProbeDef, SensorArray, SensorLayout};
pub use sensor::{Sensor, SensorReading, SensorRole};
