use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer draws on one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[default]
    Covered,
    Cleared(u8),
    Flag,
    /// Covered cell that flag mode allows flagging.
    FlagIndicator,
    Hint,
    Bomb,
    FalseFlag,
}

/// Player-visible snapshot of an engine, ready to be drawn or sent elsewhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    pub size: Coord2,
    pub phase: Phase,
    pub bombs_remaining: i32,
    pub labels: Array2<Label>,
}

impl GridView {
    pub fn from_engine(engine: &GridEngine) -> Self {
        let size = engine.size();
        let state = engine.state();
        let mut labels = Array2::from_elem(size.to_nd_index(), Label::Covered);

        for (coords, cell) in engine.iter_cells() {
            labels[coords.to_nd_index()] = if cell.is_cleared() {
                Label::Cleared(cell.adjacent_bombs())
            } else if cell.is_flagged() {
                Label::Flag
            } else if state.flag_mode {
                Label::FlagIndicator
            } else {
                Label::Covered
            };
        }

        if let Some(coords) = engine.hinted_bomb() {
            let label = &mut labels[coords.to_nd_index()];
            if *label != Label::Flag {
                *label = Label::Hint;
            }
        }

        for (coords, exposure) in engine.exposed_after_loss() {
            labels[coords.to_nd_index()] = match exposure {
                Exposure::Bomb => Label::Bomb,
                Exposure::FalseFlag => Label::FalseFlag,
            };
        }
        if let Some(coords) = engine.triggered_bomb() {
            labels[coords.to_nd_index()] = Label::Bomb;
        }

        Self {
            size,
            phase: state.phase,
            bombs_remaining: engine.bombs_remaining(),
            labels,
        }
    }

    pub fn label_at(&self, coords: Coord2) -> Option<Label> {
        in_bounds(coords, self.size).then(|| self.labels[coords.to_nd_index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDDLE_COLUMN: [Coord2; 5] = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];

    fn engine() -> GridEngine {
        let config = GameConfig::new(5, 5, 5).unwrap();
        GridEngine::from_mine_coords(config, &MIDDLE_COLUMN).unwrap()
    }

    #[test]
    fn from_engine_maps_cleared_and_flagged_cells() {
        let mut engine = engine();
        engine.activate((0, 0)).unwrap();
        engine.toggle_flag((2, 0)).unwrap();

        let view = GridView::from_engine(&engine);

        assert_eq!(view.size, (5, 5));
        assert_eq!(view.phase, Phase::InProgress);
        assert_eq!(view.bombs_remaining, 4);
        assert_eq!(view.label_at((0, 0)), Some(Label::Cleared(0)));
        assert_eq!(view.label_at((1, 2)), Some(Label::Cleared(3)));
        assert_eq!(view.label_at((2, 0)), Some(Label::Flag));
        assert_eq!(view.label_at((4, 4)), Some(Label::Covered));
        assert_eq!(view.label_at((5, 0)), None);
    }

    #[test]
    fn flag_mode_marks_flaggable_cells() {
        let mut engine = engine();
        engine.activate((0, 0)).unwrap();
        engine.toggle_flag((3, 3)).unwrap();
        engine.set_flag_mode(true);

        let view = GridView::from_engine(&engine);

        assert_eq!(view.label_at((4, 0)), Some(Label::FlagIndicator));
        assert_eq!(view.label_at((3, 3)), Some(Label::Flag));
        assert_eq!(view.label_at((1, 0)), Some(Label::Cleared(2)));
    }

    #[test]
    fn hint_shows_on_one_bomb_until_flagged() {
        let mut engine = engine();
        engine.set_hint_mode(true);

        let view = GridView::from_engine(&engine);
        assert_eq!(view.label_at((2, 0)), Some(Label::Hint));
        assert_eq!(view.label_at((2, 1)), Some(Label::Covered));

        engine.toggle_flag((2, 0)).unwrap();
        let view = GridView::from_engine(&engine);
        assert_eq!(view.label_at((2, 0)), Some(Label::Flag));

        engine.set_hint_mode(false);
        let view = GridView::from_engine(&engine);
        assert!(view.labels.iter().all(|&label| label != Label::Hint));
    }

    #[test]
    fn loss_shows_bombs_and_false_flags() {
        let mut engine = engine();
        engine.toggle_flag((0, 0)).unwrap();
        engine.toggle_flag((2, 1)).unwrap();
        engine.activate((2, 4)).unwrap();

        let view = GridView::from_engine(&engine);

        assert_eq!(view.phase, Phase::Lost);
        assert_eq!(view.label_at((2, 4)), Some(Label::Bomb));
        assert_eq!(view.label_at((2, 0)), Some(Label::Bomb));
        assert_eq!(view.label_at((2, 1)), Some(Label::Flag));
        assert_eq!(view.label_at((0, 0)), Some(Label::FalseFlag));
        assert_eq!(view.label_at((4, 4)), Some(Label::Covered));
    }

    #[test]
    fn view_serializes_labels() {
        let view = GridView::from_engine(&engine());

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["size"], serde_json::json!([5, 5]));
        assert_eq!(json["phase"], "InProgress");
        assert_eq!(json["bombs_remaining"], 5);
        assert_eq!(
            serde_json::to_value(Label::Cleared(3)).unwrap(),
            serde_json::json!({ "Cleared": 3 })
        );
    }
}
