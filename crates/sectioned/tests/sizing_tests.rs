//! Integration tests for section and cell sizing.

mod common;

use std::sync::Arc;

use common::{DEFAULT_RELATIVE_HEIGHT, FakeCellModel, logging_controller};
use sectioned::prelude::*;

const CONTAINER: Size = Size::new(200.0, 500.0);

fn bound(controller: &ListController, sections: Vec<Section>) {
    controller.update(sections, false, None);
}

fn cell_size_at(controller: &ListController, index_path: IndexPath) -> Size {
    let model = controller.cell_model(index_path).unwrap();
    let constraints = SizeConstraints::new(
        CONTAINER,
        controller.sections()[index_path.section].constraints,
    );
    controller.cell_size(model.as_ref(), &constraints)
}

fn margin(id: &str) -> Arc<dyn CellModel> {
    FakeCellModel::relative(format!("margin-{id}")).shared()
}

// ============================================================================
// Distributions
// ============================================================================

#[test]
fn test_entire_row_vertical() {
    let controller = ListController::new();
    let section = Section::new("s", FakeCellModel::many("c", 19, 75.0, 100.0));
    bound(&controller, vec![section.clone()]);

    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(200.0, 1900.0));
}

#[test]
fn test_equally_three_per_row() {
    let controller = ListController::new();
    let section = Section::new("s", FakeCellModel::many("c", 19, 75.0, 100.0))
        .with_distribution(Distribution::Equally { cells_in_row: 3 });
    bound(&controller, vec![section.clone()]);

    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(200.0, 700.0));
}

#[test]
fn test_proportionally() {
    let controller = ListController::new();
    let section = Section::new("s", FakeCellModel::many("c", 19, 75.0, 100.0))
        .with_distribution(Distribution::Proportionally);
    bound(&controller, vec![section.clone()]);

    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(200.0, 1000.0));
}

#[test]
fn test_horizontal_scrolling() {
    let controller = ListController::new();
    let section = Section::new("s", FakeCellModel::many("c", 19, 75.0, 100.0))
        .with_scroll_direction(ScrollDirection::Horizontal);
    bound(&controller, vec![section.clone()]);

    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(1425.0, 500.0));
}

#[test]
fn test_last_cell_filling_width() {
    let cases = [
        (1, Size::new(150.0, DEFAULT_RELATIVE_HEIGHT), Size::new(200.0, 100.0)),
        (2, Size::new(100.0, DEFAULT_RELATIVE_HEIGHT), Size::new(200.0, 100.0)),
        (3, Size::new(200.0, DEFAULT_RELATIVE_HEIGHT), Size::new(200.0, 136.5)),
        (4, Size::new(200.0, DEFAULT_RELATIVE_HEIGHT), Size::new(200.0, 136.5)),
        (5, Size::new(150.0, DEFAULT_RELATIVE_HEIGHT), Size::new(200.0, 200.0)),
    ];

    for (count, last_cell, section_size) in cases {
        let controller = ListController::new();
        let mut models = FakeCellModel::many("c", count, 50.0, 100.0);
        let last = FakeCellModel::relative("last").shared();
        models.push(Arc::clone(&last));
        let section = Section::new("s", models).with_distribution(
            Distribution::ProportionallyWithLastCellFillingWidth {
                minimum_width: 100.0,
            },
        );
        bound(&controller, vec![section.clone()]);

        let constraints = SizeConstraints::new(CONTAINER, section.constraints);
        assert_eq!(controller.cell_size(last.as_ref(), &constraints), last_cell, "{count} cells");
        assert_eq!(controller.section_size(&section, CONTAINER), section_size, "{count} cells");
    }
}

#[test]
fn test_insets_and_spacing() {
    let controller = ListController::new();
    let section = Section::new("s", FakeCellModel::many("c", 4, 75.0, 100.0)).with_constraints(
        SectionConstraints::default()
            .with_distribution(Distribution::Equally { cells_in_row: 2 })
            .with_inset(EdgeInsets::new(10.0, 10.0, 10.0, 10.0))
            .with_spacing(20.0, 20.0),
    );
    bound(&controller, vec![section.clone()]);

    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(200.0, 240.0));
    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 3)), Size::new(80.0, 100.0));
}

#[test]
fn test_unbound_cell_size() {
    let controller = ListController::new();
    let constraints = SizeConstraints::new(CONTAINER, SectionConstraints::default());

    let explicit = FakeCellModel::explicit("free", 75.0, 100.0);
    assert_eq!(controller.cell_size(&explicit, &constraints), Size::new(75.0, 100.0));

    let relative = FakeCellModel::relative("free-relative");
    assert_eq!(
        controller.cell_size(&relative, &constraints),
        Size::new(200.0, DEFAULT_RELATIVE_HEIGHT)
    );
}

#[test]
fn test_unknown_section_is_zero() {
    let controller = logging_controller();
    bound(&controller, vec![Section::new("s", FakeCellModel::many("c", 1, 75.0, 100.0))]);

    let stranger = Section::new("other", Vec::new());
    assert_eq!(controller.section_size(&stranger, CONTAINER), Size::ZERO);
    assert_eq!(controller.diagnostics().reported_count(), 1);
}

// ============================================================================
// Margin cells
// ============================================================================

#[test]
fn test_margin_cell_fills_leftover_height() {
    let controller = ListController::new();
    let mut models = FakeCellModel::many("c", 1, 75.0, 100.0);
    models.push(margin("0"));
    bound(&controller, vec![Section::new("s", models)]);

    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 1)), Size::new(200.0, 400.0));
}

#[test]
fn test_margin_cells_share_leftover_equally() {
    let controller = ListController::new();
    let mut models = vec![margin("above")];
    models.extend(FakeCellModel::many("c", 1, 75.0, 100.0));
    models.push(margin("below"));
    bound(&controller, vec![Section::new("s", models)]);

    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 0)), Size::new(200.0, 200.0));
    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 2)), Size::new(200.0, 200.0));
}

#[test]
fn test_margin_cells_share_across_sections() {
    let controller = ListController::new();
    let sections = (0..2)
        .map(|n| {
            let mut models = FakeCellModel::many(&format!("s{n}"), 2, 75.0, 100.0);
            models.push(margin(&n.to_string()));
            Section::new(format!("section{n}"), models)
        })
        .collect();
    bound(&controller, sections);

    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 0)), Size::new(200.0, 100.0));
    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 2)), Size::new(200.0, 50.0));
    assert_eq!(cell_size_at(&controller, IndexPath::new(1, 2)), Size::new(200.0, 50.0));
}

#[test]
fn test_margin_cells_shrink_to_minimum_on_overflow() {
    let controller = ListController::new();
    let sections = (0..2)
        .map(|n| {
            let mut models = FakeCellModel::many(&format!("s{n}"), 10, 75.0, 100.0);
            models.push(margin(&n.to_string()));
            Section::new(format!("section{n}"), models)
        })
        .collect();
    bound(&controller, sections);

    let minimum = Size::new(200.0, sectioned::layout::MINIMUM_RELATIVE_EXTENT);
    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 10)), minimum);
    assert_eq!(cell_size_at(&controller, IndexPath::new(1, 10)), minimum);
}

fn fill_width_and_margin(count: usize) -> ListController {
    let controller = ListController::new();

    let mut fill = FakeCellModel::many("fill", count, 50.0, 100.0);
    fill.push(FakeCellModel::relative("last").shared());
    let fill = Section::new("section-0", fill).with_distribution(
        Distribution::ProportionallyWithLastCellFillingWidth {
            minimum_width: 100.0,
        },
    );

    let mut plain = FakeCellModel::many("plain", count, 75.0, 100.0);
    plain.push(margin("m"));
    let plain = Section::new("section-1", plain);

    bound(&controller, vec![fill, plain]);
    controller
}

#[test]
fn test_margin_cells_ignore_filling_cells() {
    let controller = fill_width_and_margin(2);
    // The filling cell keeps its row slot; only the margin cell shares leftover.
    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 2)), Size::new(100.0, DEFAULT_RELATIVE_HEIGHT));
    assert_eq!(cell_size_at(&controller, IndexPath::new(1, 2)), Size::new(200.0, 200.0));
}

#[test]
fn test_margin_cell_next_to_single_cell_section() {
    let controller = ListController::new();

    let mut fill = FakeCellModel::many("fill", 2, 50.0, 100.0);
    fill.push(FakeCellModel::relative("last").shared());
    let fill = Section::new("section-0", fill).with_distribution(
        Distribution::ProportionallyWithLastCellFillingWidth {
            minimum_width: 100.0,
        },
    );
    let mut plain = FakeCellModel::many("plain", 1, 75.0, 100.0);
    plain.push(margin("m"));
    bound(&controller, vec![fill, Section::new("section-1", plain)]);

    assert_eq!(cell_size_at(&controller, IndexPath::new(1, 1)), Size::new(200.0, 300.0));
}

#[test]
fn test_margin_cell_at_minimum_with_filling_section() {
    let controller = fill_width_and_margin(5);
    assert_eq!(
        cell_size_at(&controller, IndexPath::new(1, 5)),
        Size::new(200.0, sectioned::layout::MINIMUM_RELATIVE_EXTENT)
    );
}

// ============================================================================
// Size delegate
// ============================================================================

struct FixedHeight(f32);

impl SizeDelegate for FixedHeight {
    fn size_for(
        &self,
        _model: &dyn CellModel,
        _index_path: IndexPath,
        constraints: &SizeConstraints,
    ) -> Option<Size> {
        Some(Size::new(constraints.cross_extent(), self.0))
    }
}

#[test]
fn test_section_size_consults_delegate() {
    let controller = ListController::new();
    let delegate: Arc<dyn SizeDelegate> = Arc::new(FixedHeight(44.0));
    controller.set_size_delegate(Some(&delegate));

    let mut models = FakeCellModel::many("c", 1, 75.0, 100.0);
    models.push(margin("0"));
    let section = Section::new("s", models);
    bound(&controller, vec![section.clone()]);

    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(200.0, 144.0));
    // Cell queries never ask the delegate.
    assert_eq!(cell_size_at(&controller, IndexPath::new(0, 1)), Size::new(200.0, 400.0));

    drop(delegate);
    controller.invalidate_layout();
    assert_eq!(controller.section_size(&section, CONTAINER), Size::new(200.0, 500.0));
}
