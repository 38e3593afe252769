use proptest::prelude::*;
use slha_convert::normalize_signs;
use slha_convert::signs::NEUTRALINOS;
use slha_core::{Block, Document};

fn neutralino_document(masses: [f64; 4]) -> Document {
    let mut doc = Document::new();
    for ((pdg, _), mass) in NEUTRALINOS.iter().zip(masses) {
        doc.set("MASS", *pdg, mass);
    }
    let mut nmix = Block::new("NMIX");
    for row in 1..=4 {
        for column in 1..=4 {
            nmix.set_with_annotation(
                (row, column),
                (row * 10 + column) as f64 / 100.0,
                format!("N_{row}{column}"),
            );
        }
    }
    doc.insert_block(nmix);
    doc
}

#[test]
fn negative_mass_rotates_row_into_imaginary_part() {
    let mut doc = neutralino_document([96.7, 181.1, -363.8, 381.7]);
    let flipped = normalize_signs(&mut doc);

    assert_eq!(flipped, vec![1000025]);
    assert_eq!(doc.mass(1000025), Some(363.8));
    let imnmix = doc.block("IMNMIX").expect("imnmix created");
    assert_eq!(imnmix.len(), 16);
    for column in 1..=4 {
        let original = (30 + column) as f64 / 100.0;
        assert_eq!(doc.get("NMIX", (3, column)), Some(0.0));
        assert_eq!(imnmix.get((3, column)), Some(original));
        assert_eq!(
            imnmix
                .entry((3, column))
                .and_then(|e| e.annotation.as_deref()),
            Some("flipped")
        );
        assert_eq!(
            doc.block("NMIX")
                .and_then(|b| b.entry((3, column)))
                .and_then(|e| e.annotation.clone()),
            Some(format!("N_3{column} flipped"))
        );
        assert_eq!(imnmix.get((1, column)), Some(0.0));
        assert_eq!(doc.get("NMIX", (1, column)), Some((10 + column) as f64 / 100.0));
    }
}

#[test]
fn existing_imaginary_part_is_rotated_too() {
    let mut doc = neutralino_document([-96.7, 181.1, 363.8, 381.7]);
    let mut imnmix = Block::zeros("IMNMIX", 4);
    imnmix.set((1, 2), 0.25);
    doc.insert_block(imnmix);
    normalize_signs(&mut doc);
    assert_eq!(doc.get("NMIX", (1, 2)), Some(-0.25));
    assert_eq!(doc.get("IMNMIX", (1, 2)), Some(0.12));
}

#[test]
fn non_negative_masses_are_untouched() {
    let mut doc = neutralino_document([96.7, 181.1, 363.8, 381.7]);
    let before = doc.clone();
    assert!(normalize_signs(&mut doc).is_empty());
    assert_eq!(doc, before);
    assert!(doc.block("IMNMIX").is_none());
}

#[test]
fn missing_masses_are_skipped() {
    let mut doc = Document::new();
    doc.set("MASS", 1000023, -150.0);
    let flipped = normalize_signs(&mut doc);
    assert_eq!(flipped, vec![1000023]);
    assert_eq!(doc.mass(1000023), Some(150.0));
    assert!(doc.mass(1000022).is_none());
}

#[test]
fn absent_nmix_flips_the_mass_only() {
    let mut doc = Document::new();
    doc.set("MASS", 1000025, -363.8);
    assert_eq!(normalize_signs(&mut doc), vec![1000025]);
    assert_eq!(doc.mass(1000025), Some(363.8));
    assert!(doc.block("NMIX").is_none());
    assert!(doc.block("IMNMIX").is_none());
}

proptest! {
    #[test]
    fn normalisation_is_idempotent_and_non_negative(
        masses in proptest::array::uniform4(-1.0e3f64..1.0e3)
    ) {
        let mut once = neutralino_document(masses);
        normalize_signs(&mut once);
        let mut twice = once.clone();
        let flipped = normalize_signs(&mut twice);

        prop_assert!(flipped.is_empty());
        prop_assert_eq!(&once, &twice);
        for (pdg, _) in NEUTRALINOS {
            prop_assert!(once.mass(pdg).unwrap() >= 0.0);
        }
    }
}
