use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::engine::fact::Fact;

/// Highest table a learner can pick.
pub const TABLE_MAX: u8 = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableSelectionError {
    #[error("pick at least one table")]
    Empty,
    #[error("table {0} is out of range (1-12)")]
    OutOfRange(u8),
    #[error("could not read '{0}' as a table number")]
    Unparseable(String),
}

/// Build the session queue: one fact per (position, table) pair across all
/// selected tables, shuffled once. The queue is never re-shuffled after this.
pub fn build_queue<R: Rng>(
    tables: &[u8],
    per_table: u8,
    rng: &mut R,
) -> Result<Vec<Fact>, TableSelectionError> {
    if tables.is_empty() {
        return Err(TableSelectionError::Empty);
    }
    if let Some(&t) = tables.iter().find(|&&t| t < 1 || t > TABLE_MAX) {
        return Err(TableSelectionError::OutOfRange(t));
    }

    let mut queue = Vec::with_capacity(tables.len() * usize::from(per_table));
    for &table in tables {
        for position in 1..=per_table {
            queue.push(Fact::new(position, table));
        }
    }
    queue.shuffle(rng);
    Ok(queue)
}

/// Parse a comma-separated table list like `3,6,7` into a sorted, deduplicated
/// selection. Range validation happens here too so CLI errors read the same as
/// in-app ones.
pub fn parse_table_list(input: &str) -> Result<Vec<u8>, TableSelectionError> {
    let mut tables = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let table: u8 = part
            .parse()
            .map_err(|_| TableSelectionError::Unparseable(part.to_string()))?;
        if table < 1 || table > TABLE_MAX {
            return Err(TableSelectionError::OutOfRange(table));
        }
        tables.push(table);
    }
    if tables.is_empty() {
        return Err(TableSelectionError::Empty);
    }
    tables.sort_unstable();
    tables.dedup();
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn test_queue_covers_every_position_table_pair_once() {
        let mut rng = SmallRng::seed_from_u64(1);
        let queue = build_queue(&[3, 7], 12, &mut rng).unwrap();
        assert_eq!(queue.len(), 24);

        let distinct: HashSet<Fact> = queue.iter().copied().collect();
        assert_eq!(distinct.len(), 24);
        for table in [3, 7] {
            for position in 1..=12 {
                assert!(distinct.contains(&Fact::new(position, table)));
            }
        }
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            build_queue(&[], 12, &mut rng),
            Err(TableSelectionError::Empty)
        );
    }

    #[test]
    fn test_out_of_range_table_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            build_queue(&[5, 13], 12, &mut rng),
            Err(TableSelectionError::OutOfRange(13))
        );
        assert_eq!(
            build_queue(&[0], 12, &mut rng),
            Err(TableSelectionError::OutOfRange(0))
        );
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = build_queue(&[2, 9], 12, &mut SmallRng::seed_from_u64(42)).unwrap();
        let b = build_queue(&[2, 9], 12, &mut SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_table_list() {
        assert_eq!(parse_table_list("3,6,7").unwrap(), vec![3, 6, 7]);
        assert_eq!(parse_table_list(" 7, 3 ,7 ").unwrap(), vec![3, 7]);
        assert_eq!(parse_table_list(""), Err(TableSelectionError::Empty));
        assert_eq!(
            parse_table_list("3,x"),
            Err(TableSelectionError::Unparseable("x".to_string()))
        );
        assert_eq!(
            parse_table_list("3,13"),
            Err(TableSelectionError::OutOfRange(13))
        );
    }
}
