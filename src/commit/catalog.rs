use rand::Rng;

/// Files touched by synthetic commits, relative to a date's update folder.
pub const CATALOG: [&str; 7] = [
    "docs/updates.md",
    "src/main.py",
    "utils/helpers.py",
    "config/settings.json",
    "README.md",
    "tests/test_main.py",
    "data/sample.json",
];

/// Pick `count` files for one day's commits.
///
/// Up to the catalog size, entries are drawn without replacement and listed in
/// catalog order. Anything beyond that is drawn with replacement.
pub fn select_targets<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<&'static str> {
    let distinct = count.min(CATALOG.len());
    let mut picked = rand::seq::index::sample(rng, CATALOG.len(), distinct).into_vec();
    picked.sort_unstable();

    let mut targets: Vec<&'static str> = picked.into_iter().map(|i| CATALOG[i]).collect();
    while targets.len() < count {
        targets.push(CATALOG[rng.gen_range(0..CATALOG.len())]);
    }
    targets
}
