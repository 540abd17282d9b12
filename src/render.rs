use crate::types::CuttingPlan;

const MAX_WIDTH: f64 = 80.0;

/// Draws one bar as a three-row strip: a box per cut labelled with the
/// piece length, and the leftover marked with `~`.
pub fn render_bar(plan: &CuttingPlan, bar_length: f64) -> String {
    let scale = MAX_WIDTH / bar_length;
    let grid_w = (bar_length * scale).round() as usize;

    if grid_w == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; 3];

    for cut in &plan.cuts {
        let sx = (cut.start * scale).round() as usize;
        let ex = (cut.end * scale).round() as usize;

        if ex <= sx {
            continue;
        }

        draw_segment(&mut grid, sx, ex);

        let label = format!("{}", cut.piece.length);
        if ex - sx > label.len() {
            let start = sx + 1 + (ex - sx - 1 - label.len()) / 2;
            for (i, ch) in label.chars().enumerate() {
                grid[1][start + i] = ch;
            }
        }
    }

    // Leftover after the last cut
    let used_x = plan
        .cuts
        .last()
        .map(|c| (c.end * scale).round() as usize)
        .unwrap_or(0);
    if used_x < grid_w {
        for x in used_x + 1..grid_w {
            grid[1][x] = '~';
        }
        draw_segment(&mut grid, used_x, grid_w);
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn draw_segment(grid: &mut [Vec<char>], x0: usize, x1: usize) {
    let cols = grid[0].len();

    for i in x0..=x1.min(cols - 1) {
        for row in [0, 2] {
            if grid[row][i] != '+' {
                grid[row][i] = '-';
            }
        }
    }

    for x in [x0, x1] {
        if x < cols {
            grid[0][x] = '+';
            grid[1][x] = '|';
            grid[2][x] = '+';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::optimize;
    use crate::types::CuttingPiece;

    fn plan(lengths: &[f64], kerf: f64) -> CuttingPlan {
        let pieces = lengths
            .iter()
            .map(|&l| CuttingPiece::new("w", "p", l))
            .collect();
        optimize(pieces, 650.0, kerf).unwrap().plans.remove(0)
    }

    #[test]
    fn test_render_single_piece() {
        let output = render_bar(&plan(&[400.0], 0.5), 650.0);
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains('+'));
        assert!(output.contains('|'));
        assert!(output.contains("400"));
        assert!(output.contains('~'));
    }

    #[test]
    fn test_render_two_pieces() {
        let output = render_bar(&plan(&[300.0, 200.0], 0.5), 650.0);
        assert!(output.contains("300"));
        assert!(output.contains("200"));
    }

    #[test]
    fn test_render_full_bar_has_no_waste() {
        let output = render_bar(&plan(&[650.0], 0.5), 650.0);
        assert!(output.contains("650"));
        assert!(!output.contains('~'));
    }
}
