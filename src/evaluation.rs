use crate::error::ConfigError;

/// How path cost `g` and heuristic `h` combine into the frontier score `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Evaluation {
    /// `f = h`, greedy best-first.
    Greedy,
    /// `f = g`, uniform-cost.
    UniformCost,
    /// `f = g + h`.
    #[default]
    AStar,
}

impl Evaluation {
    pub fn score(self, g: usize, h: usize) -> usize {
        match self {
            Evaluation::Greedy => h,
            Evaluation::UniformCost => g,
            Evaluation::AStar => g + h,
        }
    }
}

/// Selector values as used in puzzle files: 1 = `f=h`, 2 = `f=g`, 3 = `f=g+h`.
impl TryFrom<u8> for Evaluation {
    type Error = ConfigError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(Evaluation::Greedy),
            2 => Ok(Evaluation::UniformCost),
            3 => Ok(Evaluation::AStar),
            _ => Err(ConfigError::InvalidEvaluation(selector)),
        }
    }
}
