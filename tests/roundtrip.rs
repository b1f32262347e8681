use phylogenesy::core::{Sequence, SubstitutionModel, Tree};
use phylogenesy::readwrite::TreeSerializer;
use phylogenesy::reconstruction::ReverseReconstructor;
use phylogenesy::simulation::{ForwardSimulator, RandomSampler};
use phylogenesy::stats::TreeSummary;

fn grow(seed: u64, epochs: usize) -> Tree {
    let model = SubstitutionModel::new(0.6, 0.3).unwrap();
    let root = Tree::with_root(Sequence::decode("ATCGGATTACA").unwrap());
    let (tree, _) = ForwardSimulator::new(model, RandomSampler::seed_from_u64(seed))
        .grow(root, epochs, 1.)
        .unwrap();
    tree
}

fn sorted(mut lines: Vec<String>) -> Vec<String> {
    lines.sort();
    lines
}

#[test]
fn reconstructed_paths_match_serialized_paths() {
    for seed in 0..20 {
        let tree = grow(seed, 25);
        let lines = TreeSerializer::serialize(&tree);
        let reconstruction = ReverseReconstructor::reconstruct(&lines).unwrap();

        assert!(reconstruction.skipped.is_empty());
        assert!(reconstruction.abandoned.is_empty());
        assert_eq!(reconstruction.attached.len(), lines.len());
        for (line, leaf) in reconstruction.attached.iter() {
            let reconstructed = &reconstruction.tree;
            let path: Vec<String> = reconstructed
                .path(*leaf)
                .iter()
                .map(|sequence| sequence.encode())
                .collect();
            let expected: Vec<&str> = lines[line - 1].split(',').collect();
            let (depth, sequences) = expected.split_last().unwrap();
            assert_eq!(path, sequences);
            assert_eq!(reconstructed[*leaf].depth().to_string(), *depth);
        }
        assert_eq!(reconstruction.tree.len(), tree.len());
        assert_eq!(reconstruction.tree.level_sizes(), tree.level_sizes());
    }
}

#[test]
fn reserialization_is_idempotent() {
    for seed in 0..20 {
        let lines = TreeSerializer::serialize(&grow(seed, 25));
        let first = ReverseReconstructor::reconstruct(&lines).unwrap();
        let relines = TreeSerializer::serialize(&first.tree);
        let second = ReverseReconstructor::reconstruct(&relines).unwrap();
        assert_eq!(sorted(relines.clone()), sorted(lines));
        assert_eq!(
            sorted(TreeSerializer::serialize(&second.tree)),
            sorted(relines)
        );
    }
}

#[test]
fn file_roundtrip() {
    let path = std::env::temp_dir().join("phylogenesy_integration_tree.csv");
    let tree = grow(3, 10);
    TreeSerializer::write_to_file(&tree, &path).unwrap();
    let reconstruction = ReverseReconstructor::read_from_file(&path).unwrap();
    assert_eq!(
        sorted(TreeSerializer::serialize(&reconstruction.tree)),
        sorted(TreeSerializer::serialize(&tree))
    );
    std::fs::remove_file(path).unwrap();
}

#[test]
fn reconstructed_tree_can_grow_further() {
    let tree = grow(11, 5);
    let reconstruction =
        ReverseReconstructor::reconstruct(&TreeSerializer::serialize(&tree)).unwrap();
    let before = reconstruction.tree.len();
    let model = SubstitutionModel::new(0.6, 0.3).unwrap();
    let (extended, events) = ForwardSimulator::new(model, RandomSampler::seed_from_u64(1))
        .grow(reconstruction.tree, 4, 1.)
        .unwrap();
    assert_eq!(extended.len(), before + 2 * events);
}
