use super::*;

#[test]
fn total_frames_matches_duration() {
    assert_eq!(FPS.secs_to_frames_ceil(TOTAL_DURATION), TOTAL_FRAMES);
    assert!((frame_time(30) - 1.0).abs() < 1e-12);
}

#[test]
fn progress_boundaries_and_monotonicity() {
    for layer in Layer::ORDER {
        let Some(w) = layer.window() else {
            continue;
        };
        assert_eq!(progress(w.start, w), 0.0);
        assert_eq!(progress(w.end, w), 1.0);
        assert_eq!(progress(w.start - 1.0, w), 0.0);
        assert_eq!(progress(w.end + 1.0, w), 1.0);

        let mut prev = 0.0;
        for i in 0..=100 {
            let t = w.start + (w.end - w.start) * f64::from(i) / 100.0;
            let p = progress(t, w);
            assert!(p >= prev, "{} not monotonic at {t}", layer.name());
            assert!((0.0..=1.0).contains(&p));
            prev = p;
        }
    }
}

#[test]
fn windows_do_not_overlap() {
    let windows: Vec<Window> = Layer::ORDER.iter().filter_map(|l| l.window()).collect();
    for pair in windows.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
    assert!(windows.last().unwrap().end < TIMELINE.hold_until);
}

#[test]
fn only_background_is_drawn_at_zero() {
    let drawn: Vec<Layer> = Layer::ORDER
        .into_iter()
        .filter(|l| l.is_drawn_at(0.0))
        .collect();
    assert_eq!(drawn, vec![Layer::Background]);
}

#[test]
fn steady_state_after_cursor_end() {
    for t in [TIMELINE.cursor.end, 5.0, TIMELINE.hold_until] {
        assert_eq!(frame_params(t), FrameParams::STATIC);
        assert!(Layer::ORDER.iter().all(|l| l.is_drawn_at(t)));
    }
}

#[test]
fn entry_offsets_start_from_their_targets() {
    let p = frame_params(0.0);
    assert_eq!(p.product.offset_x, -80.0);
    assert_eq!(p.headline.offset_y, 40.0);
    assert_eq!(p.overlay.offset_x, 200.0);
    assert_eq!((p.cursor.offset_x, p.cursor.offset_y), (100.0, 50.0));
    assert_eq!(p.cursor.opacity, 0.0);
    assert_eq!(p.background, LayerAnim::REST);

    let mid = frame_params(0.8);
    assert!((mid.product.opacity - 0.875).abs() < 1e-9);
    assert!((mid.product.offset_x + 10.0).abs() < 1e-9);
}
