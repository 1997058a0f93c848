use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use crate::diversity::reference_directions::ReferenceDirections;

/// Reference point association of a set of normalized points.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    /// Index of the closest reference direction for every point.
    pub niche: Vec<usize>,
    /// Perpendicular distance from the point to that direction.
    pub distance: Vec<f64>,
}

/// Distance from `point` to the line through the origin along `direction`.
pub fn perpendicular_distance(direction: &[f64], point: &[f64]) -> f64 {
    let norm_u_sq: f64 = direction.iter().map(|&x| x * x).sum();
    if norm_u_sq == 0.0 {
        return point.iter().map(|&x| x * x).sum::<f64>().sqrt();
    }

    let sum_v_u: f64 = direction.iter().zip(point).map(|(a, b)| a * b).sum();
    let scale = sum_v_u / norm_u_sq;

    direction
        .iter()
        .zip(point)
        .map(|(&u, &v)| {
            let diff = u * scale - v;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Associates every normalized point with the reference direction of smallest
/// perpendicular distance. Ties go to the smallest direction index.
pub fn associate(normalized: &[Vec<f64>], directions: &ReferenceDirections) -> Association {
    let mut niche = Vec::with_capacity(normalized.len());
    let mut distance = Vec::with_capacity(normalized.len());

    for point in normalized {
        let mut best = (0, f64::INFINITY);

        for (index, direction) in directions.reference_directions.iter().enumerate() {
            let d = perpendicular_distance(direction, point);
            if d < best.1 {
                best = (index, d);
            }
        }

        niche.push(best.0);
        distance.push(best.1);
    }

    Association { niche, distance }
}

/// Niche-count based completion of a partially included front.
///
/// `selected` are positions (into the association) already admitted; their
/// niches seed the niche counts. Candidates are taken from `last_front` until
/// `remaining` are chosen: each step picks the reference direction with the
/// fewest admitted members (smallest index on ties) among those that still
/// have candidates, then the candidate of smallest perpendicular distance.
/// When that direction is still empty and several candidates share the
/// smallest distance, one of them is drawn at random.
pub fn niching(
    association: &Association,
    selected: &[usize],
    last_front: &[usize],
    reference_count: usize,
    remaining: usize,
    rng: &mut StdRng,
) -> Vec<usize> {
    let mut niche_count = vec![0usize; reference_count];
    for &position in selected {
        niche_count[association.niche[position]] += 1;
    }

    let mut pool: Vec<usize> = last_front.to_vec();
    let mut exhausted = vec![false; reference_count];
    let mut chosen = Vec::with_capacity(remaining);

    while chosen.len() < remaining && !pool.is_empty() {
        let mut next_niche: Option<usize> = None;
        for niche in 0..reference_count {
            if exhausted[niche] {
                continue;
            }
            if next_niche.map_or(true, |best| niche_count[niche] < niche_count[best]) {
                next_niche = Some(niche);
            }
        }

        let niche = match next_niche {
            Some(niche) => niche,
            None => break,
        };

        let candidates: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&position| association.niche[position] == niche)
            .collect();

        if candidates.is_empty() {
            exhausted[niche] = true;
            continue;
        }

        let min_distance = candidates
            .iter()
            .map(|&position| association.distance[position])
            .fold(f64::INFINITY, f64::min);

        let closest: Vec<usize> = candidates
            .into_iter()
            .filter(|&position| association.distance[position] == min_distance)
            .collect();

        let pick = if niche_count[niche] == 0 && closest.len() > 1 {
            *closest.choose(rng).unwrap_or(&closest[0])
        } else {
            closest[0]
        };

        pool.retain(|&position| position != pick);
        niche_count[niche] += 1;
        chosen.push(pick);
    }

    chosen
}
