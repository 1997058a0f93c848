use std::cmp::Ordering;
use itertools::Itertools;
use crate::solution::Solution;

/// Crowding distance of every member of `members` (indices into `population`),
/// returned in the same order as `members`.
///
/// For each objective the members are sorted by value; the two boundary
/// members get an infinite distance and interior members accumulate
/// `(next - prev) / (max - min)`. Objectives with `max == min` contribute 0.
pub fn crowding_distances(population: &[Solution], members: &[usize]) -> Vec<f64> {
    let size = members.len();
    let mut distances = vec![0.0; size];

    if size <= 2 {
        return vec![f64::INFINITY; size];
    }

    let number_of_objectives = population[members[0]].objectives.len();
    let value = |position: usize, objective: usize| population[members[position]].objectives[objective];

    for objective in 0..number_of_objectives {
        let order: Vec<usize> = (0..size)
            .sorted_by(|&a, &b| {
                value(a, objective)
                    .partial_cmp(&value(b, objective))
                    .unwrap_or(Ordering::Equal)
            })
            .collect();

        let first = order[0];
        let last = order[size - 1];
        let range = value(last, objective) - value(first, objective);

        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        if range <= 0.0 || !range.is_finite() {
            continue;
        }

        for k in 1..size - 1 {
            let position = order[k];
            if distances[position].is_infinite() {
                continue;
            }

            distances[position] += (value(order[k + 1], objective) - value(order[k - 1], objective)) / range;
        }
    }

    distances
}

/// Crowding distances over a whole solution set.
pub fn crowding_distances_of(solutions: &[Solution]) -> Vec<f64> {
    let members: Vec<usize> = (0..solutions.len()).collect();
    crowding_distances(solutions, &members)
}

/// Crowded comparison: lower rank first, then larger crowding distance.
pub fn crowded_comparison(rank_a: usize, distance_a: f64, rank_b: usize, distance_b: f64) -> Ordering {
    rank_a
        .cmp(&rank_b)
        .then_with(|| distance_b.partial_cmp(&distance_a).unwrap_or(Ordering::Equal))
}
