use crate::*;
pub use authored::*;
pub use random::*;

mod authored;
mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineSet>;
}
