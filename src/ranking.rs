use crate::solution::{dominance, Dominance, Solution};

/// Non-dominated sorting result, keyed by population index.
///
/// `ranks[i]` is the front of solution `i`; `fronts[k]` lists the indices of
/// rank `k` in ascending index order. Front 0 is the non-dominated set.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub ranks: Vec<usize>,
    pub fronts: Vec<Vec<usize>>,
}

impl Ranking {
    pub fn number_of_fronts(&self) -> usize {
        self.fronts.len()
    }

    pub fn front(&self, rank: usize) -> &[usize] {
        self.fronts.get(rank).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Fast non-dominated sort in O(M·N²).
///
/// Every solution gets a domination count (how many solutions dominate it)
/// and the list of solutions it dominates. Front 0 holds the zero-count
/// solutions; peeling a front decrements the counts of everything its members
/// dominate, and solutions reaching zero form the next front.
pub fn fast_non_dominated_sort(population: &[Solution]) -> Ranking {
    let n = population.len();

    let mut domination_count = vec![0usize; n];
    let mut dominated: Vec<Vec<usize>> = vec![vec![]; n];

    for p in 0..n {
        for q in (p + 1)..n {
            match dominance(&population[p], &population[q]) {
                Dominance::Left => {
                    dominated[p].push(q);
                    domination_count[q] += 1;
                }
                Dominance::Right => {
                    dominated[q].push(p);
                    domination_count[p] += 1;
                }
                Dominance::Neither => (),
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut fronts: Vec<Vec<usize>> = vec![];
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current.is_empty() {
        let rank = fronts.len();
        let mut next = vec![];

        for &p in &current {
            ranks[p] = rank;
            for &q in &dominated[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next.push(q);
                }
            }
        }

        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    Ranking { ranks, fronts }
}

/// The rank 0 members of `population`, cloned in population order.
pub fn non_dominated(population: &[Solution]) -> Vec<Solution> {
    fast_non_dominated_sort(population)
        .front(0)
        .iter()
        .map(|&index| population[index].clone())
        .collect()
}
