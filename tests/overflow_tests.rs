mod common;

use cardsheet::{FaceCapacity, FontLevel, SheetEntry, Side};
use common::fixtures::card;
use common::{letter, poker, run_layout, TestResult};

#[test]
fn test_split_conserves_blocks_in_order() -> TestResult {
    let heights = [12.0, 18.0, 9.0, 22.0, 15.0, 11.0, 20.0, 8.0];
    let mut measurer = poker();
    for (i, h) in heights.iter().enumerate() {
        measurer.set_block_height(format!("essay/{i}"), *h);
    }
    let original = card("essay", heights.len());
    let output = run_layout(measurer, &letter(), vec![original.clone().into()])?;

    let essay = output.card("essay").ok_or("missing card")?;
    assert!(essay.has_back());
    let ids: Vec<_> = essay.all_blocks().map(|b| b.id.clone()).collect();
    assert_eq!(ids, original.block_ids());

    // only the last front block carries the continuation marker
    let front = essay.blocks(Side::Front);
    let (last, rest) = front.split_last().ok_or("empty front")?;
    assert!(last.is_continued());
    assert!(rest.iter().all(|b| !b.is_continued()));
    assert!(essay.blocks(Side::Back).iter().all(|b| !b.is_continued()));
    Ok(())
}

#[test]
fn test_font_level_never_exceeds_two_steps() -> TestResult {
    let measurer = poker().with_default_block_height(20.0);
    // 5 .. 30 blocks of 20mm each
    let entries = (1..=6)
        .map(|i| card(&format!("wall-{}", i - 1), 5 * i).into())
        .collect::<Vec<SheetEntry>>();
    let output = run_layout(measurer, &letter(), entries)?;

    for resolution in &output.resolutions {
        assert!(resolution.font_level.steps() <= 2, "{resolution:?}");
    }
    let worst = output.card("wall-5").ok_or("missing card")?;
    assert_eq!(worst.font_level, FontLevel::Minimal);
    assert!(output.report.degraded_cards >= 1);
    Ok(())
}

#[test]
fn test_larger_capacity_avoids_split() -> TestResult {
    let measurer = poker()
        .with_block_height("tall/0", 40.0)
        .with_block_height("tall/1", 40.0);
    let ctx = letter().with_capacity(FaceCapacity::uniform(80.0));
    let output = run_layout(measurer, &ctx, vec![card("tall", 2).into()])?;
    let tall = output.card("tall").ok_or("missing card")?;
    assert!(!tall.has_back());
    assert_eq!(output.report.faces, 1);
    Ok(())
}

#[test]
fn test_trial_shrink_keeps_one_face() -> TestResult {
    // 66mm at normal size, about 56mm one level down
    let measurer = poker()
        .with_block_height("dense/0", 33.0)
        .with_block_height("dense/1", 33.0);
    let output = run_layout(measurer, &letter(), vec![card("dense", 2).into()])?;
    let dense = output.card("dense").ok_or("missing card")?;
    assert!(!dense.has_back());
    assert_eq!(dense.font_level, FontLevel::Reduced);
    Ok(())
}
