use std::io::{self, Write};

use minegrid_core::{GridEngine, GridView, Label};

pub fn glyph(label: Label) -> char {
    match label {
        Label::Covered => '□',
        Label::Cleared(0) => ' ',
        Label::Cleared(count) => char::from_digit(u32::from(count), 10).unwrap_or('?'),
        Label::Flag => '⚑',
        Label::FlagIndicator => '⚐',
        Label::Hint => '¤',
        Label::Bomb => '*',
        Label::FalseFlag => '✗',
    }
}

/// Prints the status line and the grid, columns are x and rows are y.
pub fn render(engine: &GridEngine, out: &mut impl Write) -> io::Result<()> {
    let view = GridView::from_engine(engine);
    let state = engine.state();
    let (cols, rows) = view.size;

    write!(out, "Bombs remaining: {}", view.bombs_remaining)?;
    if state.flag_mode {
        write!(out, "  [flag mode]")?;
    }
    if state.hint_mode {
        write!(out, "  [hint]")?;
    }
    writeln!(out)?;

    write!(out, "    ")?;
    for x in 0..cols {
        write!(out, "{x:>3}")?;
    }
    writeln!(out)?;

    for y in 0..rows {
        write!(out, "{y:>3} ")?;
        for x in 0..cols {
            let label = view.label_at((x, y)).unwrap_or_default();
            write!(out, "{:>3}", glyph(label))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::GameConfig;

    #[test]
    fn glyphs_show_counts_and_markers() {
        assert_eq!(glyph(Label::Cleared(0)), ' ');
        assert_eq!(glyph(Label::Cleared(8)), '8');
        assert_eq!(glyph(Label::Flag), '⚑');
        assert_eq!(glyph(Label::Covered), '□');
    }

    #[test]
    fn render_prints_header_and_rows() {
        let config = GameConfig::new(5, 5, 5).unwrap();
        let mines = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
        let mut engine = GridEngine::from_mine_coords(config, &mines).unwrap();
        engine.activate((0, 0)).unwrap();
        engine.toggle_flag((2, 0)).unwrap();
        engine.set_flag_mode(true);

        let mut out = Vec::new();
        render(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Bombs remaining: 4  [flag mode]");
        assert_eq!(lines[1], "      0  1  2  3  4");
        assert_eq!(lines[2], "  0      2  ⚑  ⚐  ⚐");
        assert_eq!(lines.len(), 7);
    }
}
