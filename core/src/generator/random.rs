use super::*;

/// Classic-mode generation: uniform rejection sampling of distinct positions.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineSet> {
        use rand::prelude::*;

        config.validate()?;

        let (rows, columns) = config.size;
        let wanted = usize::from(config.mines);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines = MineSet::new();
        let mut draws: u32 = 0;

        // acceptance chance never drops below 1 / total_tiles, so this terminates
        while mines.len() < wanted {
            let row = rng.random_range(0..rows);
            let column = rng.random_range(0..columns);
            draws += 1;
            mines.insert((row, column));
        }

        log::debug!(
            "Placed {} mines on a {}x{} board in {} draws",
            mines.len(),
            rows,
            columns,
            draws
        );
        Ok(mines)
    }
}

/// Samples `mine_count` distinct positions on a `rows` x `columns` board.
pub fn generate_random_layout(
    rows: Coord,
    columns: Coord,
    mine_count: CellCount,
    seed: u64,
) -> Result<MineSet> {
    RandomLayoutGenerator::new(seed).generate(GameConfig::new_unchecked((rows, columns), mine_count))
}
