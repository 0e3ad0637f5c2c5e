use xc_grover::encoding::{ExactCoverProblem, SubsetCollection, Universe};

/// A tiling-like instance: `u_size` elements covered by every window of
/// `width` consecutive elements, plus the singletons.
pub fn windowed_problem(u_size: usize, width: usize) -> ExactCoverProblem<usize> {
    let universe = Universe::try_new(0..u_size).unwrap();
    let mut subsets = SubsetCollection::new();
    for start in 0..=u_size - width {
        subsets
            .insert(format!("w{start}"), start..start + width)
            .unwrap();
    }
    for i in 0..u_size {
        subsets.insert(format!("s{i}"), [i]).unwrap();
    }
    ExactCoverProblem::new(universe, subsets).with_num_solutions(1.0)
}
