//! Integration test: drive the selection state machine through the
//! pick / drop / remove / submit flows of the upload page.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use docdrop_core::{
    DragAffordance, DragKind, IconGlyph, SelectedFile, Selection, SelectionError, UiState,
    VisibleSurface, View, drag, format_size,
};

/// Check the visibility invariants every view must satisfy.
fn assert_exclusive(view: &View<'_>) {
    assert_ne!(
        view.prompt_visible(),
        view.summary.is_some(),
        "exactly one of prompt and summary must be visible: {view:?}"
    );
    assert_eq!(
        view.state == UiState::Empty,
        view.summary.is_none(),
        "Empty state must coincide with no summary: {view:?}"
    );
    if view.state == UiState::Empty {
        assert_eq!(view.preview, None, "empty view must hide all previews");
    }
}

#[test]
fn size_examples() {
    assert_eq!(format_size(0), "0 Bytes");
    assert_eq!(format_size(1024), "1 KB");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_size(1_048_576), "1 MB");
}

#[test]
fn dropped_photo_shows_summary_then_thumbnail() {
    let mut selection = Selection::default();
    let mut affordance = DragAffordance::default();

    // enter, a few overs, then drop with two files.
    affordance.apply(DragKind::Enter);
    affordance.apply(DragKind::Over);
    affordance.apply(DragKind::Over);
    assert!(affordance.is_active());
    affordance.apply(DragKind::Drop);
    assert!(!affordance.is_active());

    let dropped = vec![
        SelectedFile::new("photo.png", 2_097_152, "image/png"),
        SelectedFile::new("second.png", 10, "image/png"),
    ];
    let file = drag::first_file(dropped).expect("drop carried files");
    let ticket = selection
        .select(file, ())
        .unwrap()
        .expect("images need a read");

    let view = selection.view();
    assert_exclusive(&view);
    let summary = view.summary.clone().unwrap();
    assert_eq!(summary.name, "photo.png");
    assert_eq!(summary.size, "2 MB");
    assert_eq!(view.preview, None, "icons hidden while the read is in flight");

    assert!(selection.complete_read(ticket, "data:image/png;base64,iVBOR".into()));
    let view = selection.view();
    assert_exclusive(&view);
    assert_eq!(
        view.preview,
        Some(VisibleSurface::Image("data:image/png;base64,iVBOR"))
    );
}

#[test]
fn empty_drop_changes_nothing() {
    let mut selection = Selection::<()>::default();
    let before = format!("{:?}", selection.view());
    if let Some(file) = drag::first_file(Vec::<SelectedFile>::new()) {
        let _ = selection.select(file, ());
    }
    assert_eq!(format!("{:?}", selection.view()), before);
}

#[test]
fn slow_image_read_never_overwrites_newer_selection() {
    let mut selection = Selection::default();
    let slow = selection
        .select(SelectedFile::new("a.jpg", 5_000_000, "image/jpeg"), ())
        .unwrap()
        .unwrap();

    // Replaced by a non-image before the read resolves.
    let none = selection
        .select(SelectedFile::new("b.docx", 1000, ""), ())
        .unwrap();
    assert!(none.is_none());

    assert!(!selection.complete_read(slow, "data:image/jpeg;base64,AAAA".into()));
    let view = selection.view();
    assert_exclusive(&view);
    assert_eq!(view.preview, Some(VisibleSurface::Icon(IconGlyph::Generic)));
    assert_eq!(view.summary.unwrap().name, "b.docx");
}

#[test]
fn select_clear_select_reproduces_the_summary() {
    let file = SelectedFile::new("invoice.pdf", 123_456, "application/pdf");
    let mut selection = Selection::default();

    let _ = selection.select(file.clone(), ()).unwrap();
    let first = selection.view().summary.map(|s| (s.name.to_owned(), s.size));

    assert!(selection.clear());
    assert_exclusive(&selection.view());

    let _ = selection.select(file, ()).unwrap();
    let second = selection.view().summary.map(|s| (s.name.to_owned(), s.size));

    assert_eq!(first, second);
    assert_eq!(
        first,
        Some(("invoice.pdf".to_owned(), "120.56 KB".to_owned()))
    );
}

#[test]
fn pdf_extension_fallback_with_empty_mime() {
    let mut selection = Selection::default();
    let ticket = selection
        .select(SelectedFile::new("report.PDF", 42, ""), ())
        .unwrap();
    assert!(ticket.is_none());
    assert_eq!(
        selection.view().preview,
        Some(VisibleSurface::Icon(IconGlyph::Pdf))
    );
}

#[test]
fn empty_submission_is_blocked() {
    let mut selection = Selection::<()>::default();
    assert_eq!(selection.submit(0), Err(SelectionError::NoFileSelected));
    assert_eq!(selection.state(), UiState::Empty);
    assert!(!selection.view().busy());
}

#[test]
fn exclusivity_holds_for_every_short_operation_sequence() {
    #[derive(Clone, Copy, Debug)]
    enum Op {
        SelectImage,
        SelectPdf,
        SelectOther,
        Clear,
        ResolveOldest,
        Submit,
    }
    const OPS: [Op; 6] = [
        Op::SelectImage,
        Op::SelectPdf,
        Op::SelectOther,
        Op::Clear,
        Op::ResolveOldest,
        Op::Submit,
    ];
    const LEN: u32 = 4;

    for mut code in 0..OPS.len().pow(LEN) {
        let mut selection = Selection::default();
        let mut tickets = Vec::new();
        let mut trace = Vec::new();

        for _ in 0..LEN {
            let op = OPS[code % OPS.len()];
            code /= OPS.len();
            trace.push(op);

            match op {
                Op::SelectImage => {
                    if let Ok(Some(t)) =
                        selection.select(SelectedFile::new("p.png", 2048, "image/png"), ())
                    {
                        tickets.push(t);
                    }
                }
                Op::SelectPdf => {
                    let _ = selection.select(SelectedFile::new("d.pdf", 2048, ""), ());
                }
                Op::SelectOther => {
                    let _ = selection.select(SelectedFile::new("t.txt", 2048, "text/plain"), ());
                }
                Op::Clear => {
                    selection.clear();
                }
                Op::ResolveOldest => {
                    if !tickets.is_empty() {
                        let t = tickets.remove(0);
                        let current = selection.is_current(&t);
                        let applied = selection.complete_read(t, "data:p".into());
                        assert!(!applied || current, "stale read applied: {trace:?}");
                    }
                }
                Op::Submit => {
                    let native = usize::from(selection.file().is_some());
                    let _ = selection.submit(native);
                }
            }

            let view = selection.view();
            assert_exclusive(&view);
            if let Some(VisibleSurface::Image(_)) = view.preview {
                assert_eq!(
                    selection.file().map(|f| f.name.as_str()),
                    Some("p.png"),
                    "image surface visible for a non-image: {trace:?}"
                );
            }
        }
    }
}
