//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::InputIntent;

/// Sample the keyboard into [`InputIntent`]. Without a keyboard resource
/// (headless runs) the intent is left to whoever else writes it.
pub(crate) fn read_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut input: ResMut<InputIntent>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    input.left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    input.right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
    input.up = keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    input.down = keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown);
    input.jump = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    input.roll = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::KeyJ);
}
