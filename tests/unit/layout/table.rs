use super::*;

#[test]
fn header_height_grows_per_hero_row() {
    for hc in HeroCount::ALL {
        let canvas = descriptor(AssetKind::Header).canvas(hc);
        assert_eq!(canvas.width, 2064);
        assert_eq!(canvas.height, 600 + 113 * (hc.get() as u32 - 1));
    }
}

#[test]
fn social_mask_heights_are_literal() {
    let heights: Vec<f64> = HeroCount::ALL
        .iter()
        .map(|&hc| layout(AssetKind::Social, hc).mask_height)
        .collect();
    assert_eq!(heights, vec![369.0, 515.0, 717.0]);
    for hc in HeroCount::ALL {
        assert_eq!(
            descriptor(AssetKind::Social).canvas(hc),
            Canvas {
                width: 2400,
                height: 1260
            }
        );
    }
}

#[test]
fn overlays_are_distinct_per_variant() {
    let mut names = Vec::new();
    for kind in [AssetKind::Social, AssetKind::Header] {
        for hc in HeroCount::ALL {
            names.push(layout(kind, hc).overlay);
        }
    }
    let mut dedup = names.clone();
    dedup.sort_unstable();
    dedup.dedup();
    assert_eq!(dedup.len(), 6);
    assert_eq!(layout(AssetKind::Header, HeroCount::Three).overlay, "HeaderBox_3.png");
}

#[test]
fn only_social_has_copy_layers() {
    assert!(descriptor(AssetKind::Social).has_copy_layers);
    assert!(!descriptor(AssetKind::Header).has_copy_layers);
    assert_eq!(
        descriptor(AssetKind::Header).cursor_anchor,
        CursorAnchor::OverlayRightEdge
    );
}
