use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ChainError {
    #[error("Chain sequence is empty")]
    Empty,

    #[error("Invalid character '{character}' at position {position}: expected '0' or '1'")]
    InvalidCharacter { position: usize, character: char },
}

/// A binary-labeled chain in the HP model: `true` marks a hydrophobic ("1")
/// residue, `false` a polar ("0") one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpChain {
    residues: Vec<bool>,
}

impl HpChain {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Zero-based positions of the hydrophobic residues.
    pub fn hydrophobic_positions(&self) -> Vec<usize> {
        self.residues
            .iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(i))
            .collect()
    }

    /// Number of chain-adjacent hydrophobic pairs. These pairs always sit on
    /// neighboring lattice cells and therefore never count as genuine contacts.
    pub fn adjacent_hydrophobic_pairs(&self) -> u32 {
        self.residues
            .windows(2)
            .filter(|pair| pair[0] && pair[1])
            .count() as u32
    }

    /// Side length of the smallest lattice the search embeds this chain into:
    /// the full chain length for short chains, a quarter-perimeter bound above.
    pub fn lattice_width(&self) -> u32 {
        let n = self.residues.len() as u32;
        if n >= 12 { 1 + n / 4 } else { n }
    }
}

impl FromStr for HpChain {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ChainError::Empty);
        }

        let residues = s
            .chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ChainError::InvalidCharacter {
                    position,
                    character,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { residues })
    }
}

impl fmt::Display for HpChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &h in &self.residues {
            f.write_str(if h { "1" } else { "0" })?;
        }
        Ok(())
    }
}
