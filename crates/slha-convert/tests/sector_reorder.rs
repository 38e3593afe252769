use proptest::prelude::*;
use slha_convert::{
    reorder_sector, row_order, Diagnostics, ReorderPolicy, WarningKind, SECTORS,
};
use slha_core::{Block, Document};

fn sector_document(sector: usize, masses: &[f64]) -> Document {
    let sector = &SECTORS[sector];
    let mut doc = Document::new();
    for (pdg, mass) in sector.particles.iter().zip(masses) {
        doc.set("MASS", *pdg, *mass);
    }
    let n = sector.particles.len() as i32;
    let mut matrix = Block::new(sector.mixing);
    for row in 1..=n {
        for column in 1..=n {
            matrix.set_with_annotation(
                (row, column),
                (row * 10 + column) as f64,
                format!("R{row}{column}"),
            );
        }
    }
    doc.insert_block(matrix);
    doc
}

fn row(doc: &Document, block: &str, row: i32, n: i32) -> Vec<f64> {
    (1..=n).map(|column| doc.get(block, (row, column)).unwrap()).collect()
}

#[test]
fn generation_paired_swaps_heavier_left_state() {
    let mut doc = sector_document(1, &[500.0, 400.0, 400.0, 300.0, 450.0, 450.0]);
    let mut diagnostics = Diagnostics::new();
    let changed = reorder_sector(&mut doc, &SECTORS[1], ReorderPolicy::GenerationPaired, &mut diagnostics);

    assert!(changed);
    assert_eq!(doc.mass(1000001), Some(300.0));
    assert_eq!(doc.mass(2000001), Some(500.0));
    assert_eq!(doc.mass(1000003), Some(400.0));
    assert_eq!(row(&doc, "DSQMIX", 1, 6), vec![41.0, 42.0, 43.0, 44.0, 45.0, 46.0]);
    assert_eq!(row(&doc, "DSQMIX", 4, 6), vec![11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
    assert_eq!(row(&doc, "DSQMIX", 2, 6), vec![21.0, 22.0, 23.0, 24.0, 25.0, 26.0]);
    assert_eq!(
        doc.block("DSQMIX")
            .and_then(|b| b.entry((1, 1)))
            .and_then(|e| e.annotation.as_deref()),
        Some("R41")
    );
}

#[test]
fn ordered_sector_is_unchanged() {
    let mut doc = sector_document(0, &[300.0, 310.0, 320.0, 500.0, 510.0, 520.0]);
    let before = doc.clone();
    let mut diagnostics = Diagnostics::new();
    for policy in [ReorderPolicy::GenerationPaired, ReorderPolicy::FullMixing] {
        assert!(!reorder_sector(&mut doc, &SECTORS[0], policy, &mut diagnostics));
        assert_eq!(doc, before);
    }
}

#[test]
fn full_mixing_sorts_by_mass() {
    let mut doc = sector_document(2, &[500.0, 100.0, 700.0, 200.0, 300.0, 600.0]);
    let mut diagnostics = Diagnostics::new();
    assert!(reorder_sector(&mut doc, &SECTORS[2], ReorderPolicy::FullMixing, &mut diagnostics));

    let masses: Vec<f64> = SECTORS[2]
        .particles
        .iter()
        .map(|pdg| doc.mass(*pdg).unwrap())
        .collect();
    assert_eq!(masses, vec![100.0, 200.0, 300.0, 500.0, 600.0, 700.0]);
    let first_columns: Vec<f64> = (1..=6).map(|r| doc.get("SELMIX", (r, 1)).unwrap()).collect();
    assert_eq!(first_columns, vec![21.0, 41.0, 51.0, 11.0, 61.0, 31.0]);
}

#[test]
fn full_mixing_ties_keep_input_order() {
    assert_eq!(
        row_order(&[2.0, 1.0, 2.0, 1.0], ReorderPolicy::FullMixing),
        vec![1, 3, 0, 2]
    );
}

#[test]
fn sneutrinos_are_untouched_when_paired() {
    let mut doc = sector_document(3, &[300.0, 200.0, 100.0]);
    let mut diagnostics = Diagnostics::new();
    assert!(!reorder_sector(&mut doc, &SECTORS[3], ReorderPolicy::GenerationPaired, &mut diagnostics));
    assert!(reorder_sector(&mut doc, &SECTORS[3], ReorderPolicy::FullMixing, &mut diagnostics));
    assert_eq!(doc.mass(1000012), Some(100.0));
    assert_eq!(row(&doc, "SNUMIX", 1, 3), vec![31.0, 32.0, 33.0]);
}

#[test]
fn incomplete_sectors_are_skipped() {
    let mut doc = sector_document(0, &[500.0, 400.0, 400.0, 300.0, 450.0]);
    let mut diagnostics = Diagnostics::new();
    assert!(!reorder_sector(&mut doc, &SECTORS[0], ReorderPolicy::FullMixing, &mut diagnostics));
    assert_eq!(diagnostics.count(WarningKind::SectorSkipped), 1);

    let mut doc = sector_document(0, &[500.0, 400.0, 400.0, 300.0, 450.0, 450.0]);
    doc.remove_block("USQMIX");
    assert!(!reorder_sector(&mut doc, &SECTORS[0], ReorderPolicy::FullMixing, &mut diagnostics));
    assert_eq!(diagnostics.count(WarningKind::SectorSkipped), 2);
    assert_eq!(doc.mass(1000002), Some(500.0));
}

proptest! {
    #[test]
    fn reordering_permutes_rows_with_their_masses(
        masses in proptest::collection::vec(1.0f64..2.0e3, 6),
        full in any::<bool>(),
    ) {
        let policy = ReorderPolicy::from_full_mixing(full);
        let mut doc = sector_document(0, &masses);
        let mut diagnostics = Diagnostics::new();
        reorder_sector(&mut doc, &SECTORS[0], policy, &mut diagnostics);

        for (new, pdg) in SECTORS[0].particles.iter().enumerate() {
            let mass = doc.mass(*pdg).unwrap();
            let old = masses.iter().position(|m| *m == mass).expect("mass preserved");
            let first = doc.get("USQMIX", (new as i32 + 1, 1)).unwrap();
            prop_assert_eq!(first, ((old as i32 + 1) * 10 + 1) as f64);
        }
        let sorted: Vec<f64> = SECTORS[0].particles.iter().map(|p| doc.mass(*p).unwrap()).collect();
        if full {
            prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        } else {
            for light in 0..3 {
                prop_assert!(sorted[light] <= sorted[light + 3]);
            }
        }
    }
}
