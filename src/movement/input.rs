//! Movement domain: keyboard sampling.

use bevy::prelude::*;

use super::resources::MovementInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    input.left_held = keyboard.pressed(KeyCode::ArrowLeft);
    input.right_held = keyboard.pressed(KeyCode::ArrowRight);
    input.jump_held = keyboard.pressed(KeyCode::KeyA);

    if keyboard.just_released(KeyCode::ArrowLeft) {
        input.left_released = true;
    }
    if keyboard.just_released(KeyCode::ArrowRight) {
        input.right_released = true;
    }
    if keyboard.just_released(KeyCode::KeyS) {
        input.fire_released = true;
    }
}
