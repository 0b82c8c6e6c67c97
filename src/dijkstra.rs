//! Label-setting shortest path search in the style of
//! [pathfinding's dijkstra function](https://docs.rs/pathfinding/latest/pathfinding/directed/dijkstra/index.html),
//! with ties between equal costs broken by insertion order so that results are deterministic.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Owned queue record. Superseded records are left in the heap and skipped when popped.
struct SmallestCostHolder<N, K> {
    cost: K,
    sequence: usize,
    node: N,
}

impl<N, K: PartialEq> Eq for SmallestCostHolder<N, K> {}

impl<N, K: PartialEq> PartialEq for SmallestCostHolder<N, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.sequence == other.sequence
    }
}

impl<N, K: Ord> PartialOrd for SmallestCostHolder<N, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, K: Ord> Ord for SmallestCostHolder<N, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smallest cost first, then earliest insertion
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Computes a cheapest path from `start` to the first node for which `success` holds.
///
/// `successors` yields the neighbours of a node together with the (non-negative) cost of
/// moving there. The search stops as soon as a node satisfying `success` is taken from the
/// queue, which is only correct because costs are never negative. Returns the path including
/// both endpoints and its total cost, or [None] if the queue runs dry first.
pub fn dijkstra<N, C, FN, IN, FS>(
    start: &N,
    mut successors: FN,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    let mut sequence = 0;
    to_see.push(SmallestCostHolder {
        cost: C::zero(),
        sequence,
        node: start.clone(),
    });
    // Best known cost and the index of the predecessor it was reached from, per node.
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, C::zero()));
    let mut visited: FxHashSet<N> = FxHashSet::default();

    while let Some(SmallestCostHolder { cost, node, .. }) = to_see.pop() {
        if visited.contains(&node) {
            continue;
        }
        if success(&node) {
            debug!("Goal reached after expanding {} nodes", visited.len());
            let index = parents.get_index_of(&node)?;
            let path = reverse_path(&parents, |&(p, _)| p, index);
            return Some((path, cost));
        }
        let parent_index = parents.get_index_of(&node)?;
        let successors = successors(&node);
        visited.insert(node);
        for (successor, move_cost) in successors {
            if visited.contains(&successor) {
                continue;
            }
            let new_cost = cost + move_cost;
            match parents.entry(successor.clone()) {
                Vacant(e) => {
                    e.insert((parent_index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        e.insert((parent_index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            sequence += 1;
            to_see.push(SmallestCostHolder {
                cost: new_cost,
                sequence,
                node: successor,
            });
        }
    }
    debug!(
        "Queue exhausted after expanding {} nodes without reaching a goal",
        visited.len()
    );
    None
}
