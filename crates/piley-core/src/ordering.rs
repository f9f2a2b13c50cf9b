//! User-defined pile ordering.
//!
//! The persisted preference is a list of pile ids. Piles missing from it
//! (typically newly created ones) sort after every listed pile, by id.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::models::PileWithTasks;

/// Sort key of a pile id under the given preference. Widened so that
/// `id + order_len` cannot overflow for any pile id.
fn sort_key(id: i64, positions: &HashMap<i64, usize>, order_len: usize) -> i128 {
    match positions.get(&id) {
        Some(&position) => position as i128,
        None => i128::from(id) + order_len as i128,
    }
}

/// Piles sorted by the persisted order preference.
pub fn resolve_pile_order<'a>(piles: &'a [PileWithTasks], order: &[i64]) -> Vec<&'a PileWithTasks> {
    let mut positions = HashMap::with_capacity(order.len());
    for (position, &id) in order.iter().enumerate() {
        positions.entry(id).or_insert(position);
    }

    let mut sorted: Vec<&PileWithTasks> = piles.iter().collect();
    sorted.sort_by_key(|p| sort_key(p.pile.id, &positions, order.len()));
    sorted
}

/// Moves the pile at `from` to `to` in the displayed sequence and returns
/// the preference list to persist.
pub fn move_pile(displayed: &[i64], from: usize, to: usize) -> Result<Vec<i64>, CoreError> {
    if from >= displayed.len() || to >= displayed.len() {
        return Err(CoreError::InvalidInput(format!(
            "Cannot move position {} to {}: there are {} piles",
            from + 1,
            to + 1,
            displayed.len()
        )));
    }

    let mut order = displayed.to_vec();
    let id = order.remove(from);
    order.insert(to, id);
    Ok(order)
}
