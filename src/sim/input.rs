use bitflags::bitflags;

bitflags! {
    /// Held movement keys.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Held: u8 {
        const FORWARD      = 0x01;
        const BACK         = 0x02;
        const STRAFE_LEFT  = 0x04;
        const STRAFE_RIGHT = 0x08;
        const TURN_LEFT    = 0x10;
        const TURN_RIGHT   = 0x20;
    }
}

/// Logical key, independent of the windowing backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    ToggleMinimap,
}

impl Action {
    fn held_bit(self) -> Option<Held> {
        Some(match self {
            Action::Forward => Held::FORWARD,
            Action::Back => Held::BACK,
            Action::StrafeLeft => Held::STRAFE_LEFT,
            Action::StrafeRight => Held::STRAFE_RIGHT,
            Action::TurnLeft => Held::TURN_LEFT,
            Action::TurnRight => Held::TURN_RIGHT,
            Action::ToggleMinimap => return None,
        })
    }
}

/// What the simulation consumes for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (left / right)
}

/// Key state owned by the main loop and fed from key-down / key-up events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: Held,
    toggles: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, action: Action) {
        match action.held_bit() {
            Some(bit) => self.held.insert(bit),
            None => self.toggles += 1,
        }
    }

    pub fn key_up(&mut self, action: Action) {
        if let Some(bit) = action.held_bit() {
            self.held.remove(bit);
        }
    }

    #[inline]
    pub fn held(&self) -> Held {
        self.held
    }

    /// True (once) if the minimap toggle was pressed an odd number of times
    /// since the last call.
    pub fn take_minimap_toggle(&mut self) -> bool {
        let flip = self.toggles % 2 == 1;
        self.toggles = 0;
        flip
    }

    /// Resolve held keys into movement and turn axes; opposing keys cancel.
    pub fn command(&self) -> InputCmd {
        let axis = |pos: Held, neg: Held| -> f32 {
            self.held.contains(pos) as i8 as f32 - self.held.contains(neg) as i8 as f32
        };
        InputCmd {
            forward: axis(Held::FORWARD, Held::BACK),
            strafe: axis(Held::STRAFE_RIGHT, Held::STRAFE_LEFT),
            turn: axis(Held::TURN_RIGHT, Held::TURN_LEFT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_resolve_to_axes() {
        let mut input = InputState::new();
        input.key_down(Action::Forward);
        input.key_down(Action::StrafeLeft);
        input.key_down(Action::TurnRight);
        assert_eq!(
            input.command(),
            InputCmd {
                forward: 1.0,
                strafe: -1.0,
                turn: 1.0
            }
        );

        input.key_up(Action::Forward);
        input.key_up(Action::TurnRight);
        assert_eq!(input.command().forward, 0.0);
        assert_eq!(input.command().turn, 0.0);
        assert_eq!(input.command().strafe, -1.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = InputState::new();
        input.key_down(Action::Forward);
        input.key_down(Action::Back);
        input.key_down(Action::TurnLeft);
        input.key_down(Action::TurnRight);
        assert_eq!(input.command(), InputCmd::default());
    }

    #[test]
    fn minimap_toggle_is_edge_triggered() {
        let mut input = InputState::new();
        assert!(!input.take_minimap_toggle());
        input.key_down(Action::ToggleMinimap);
        input.key_up(Action::ToggleMinimap);
        assert!(input.take_minimap_toggle());
        assert!(!input.take_minimap_toggle());
        input.key_down(Action::ToggleMinimap);
        input.key_down(Action::ToggleMinimap);
        assert!(!input.take_minimap_toggle());
        assert!(input.held().is_empty());
    }
}
