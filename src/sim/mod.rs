pub mod collision;
pub mod components;
pub mod input;
pub mod mob;
pub mod systems;
mod tic;

pub use collision::{MoveResult, try_move};
pub use components::{Body, Enemy, Heading, Health, Speed, Sprite};
pub use input::{Action, InputCmd, InputState};
pub use mob::SpawnError;
pub use tic::{FRAME_TARGET, FrameClock, MAX_DT, Sim, StepOutcome};
