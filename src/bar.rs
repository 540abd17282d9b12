use crate::types::{Cut, CuttingPiece, CuttingPlan};

/// A stock bar being filled left to right.
#[derive(Debug, Clone)]
pub struct OpenBar {
    length: f64,
    kerf: f64,
    available: f64,
    position: f64,
    pub cuts: Vec<Cut>,
}

impl OpenBar {
    pub fn new(length: f64, kerf: f64) -> Self {
        Self {
            length,
            kerf,
            available: length,
            position: 0.0,
            cuts: Vec::new(),
        }
    }

    /// Length a piece takes on this bar, including the saw cut separating it
    /// from the previous piece. The first piece on a bar needs no kerf.
    pub fn required(&self, piece: &CuttingPiece) -> f64 {
        piece.length + self.leading_kerf()
    }

    pub fn fits(&self, piece: &CuttingPiece) -> bool {
        self.required(piece) <= self.available
    }

    pub fn place(&mut self, piece: CuttingPiece) -> &Cut {
        let kerf = self.leading_kerf();
        self.position += kerf;
        let start = self.position;
        self.position += piece.length;
        self.available -= kerf + piece.length;

        self.cuts.push(Cut {
            piece,
            start,
            end: self.position,
        });
        &self.cuts[self.cuts.len() - 1]
    }

    pub fn used_length(&self) -> f64 {
        self.length - self.available
    }

    pub fn available(&self) -> f64 {
        self.available
    }

    pub fn close(self, bar_index: usize) -> CuttingPlan {
        let used_length = self.used_length();
        CuttingPlan {
            bar_index,
            used_length,
            waste: self.length - used_length,
            efficiency: used_length / self.length * 100.0,
            cuts: self.cuts,
        }
    }

    fn leading_kerf(&self) -> f64 {
        if self.cuts.is_empty() { 0.0 } else { self.kerf }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(length: f64) -> CuttingPiece {
        CuttingPiece::new("w", "p", length)
    }

    #[test]
    fn test_place_single_piece() {
        let mut bar = OpenBar::new(650.0, 0.5);
        let cut = bar.place(piece(400.0));
        assert_eq!(cut.start, 0.0);
        assert_eq!(cut.end, 400.0);
        assert_eq!(bar.available(), 250.0);
    }

    #[test]
    fn test_kerf_between_pieces() {
        let mut bar = OpenBar::new(650.0, 0.5);
        bar.place(piece(300.0));
        assert_eq!(bar.required(&piece(200.0)), 200.5);
        let cut = bar.place(piece(200.0));
        assert_eq!(cut.start, 300.5);
        assert_eq!(cut.end, 500.5);
        assert_eq!(bar.used_length(), 500.5);
    }

    #[test]
    fn test_piece_too_large() {
        let mut bar = OpenBar::new(650.0, 0.5);
        assert!(!bar.fits(&piece(651.0)));
        bar.place(piece(400.0));
        assert!(!bar.fits(&piece(250.0)));
        assert!(bar.fits(&piece(249.5)));
    }

    #[test]
    fn test_fill_exact() {
        let mut bar = OpenBar::new(650.0, 0.0);
        bar.place(piece(650.0));
        let plan = bar.close(1);
        assert_eq!(plan.waste, 0.0);
        assert_eq!(plan.efficiency, 100.0);
    }

    #[test]
    fn test_close_reports_waste() {
        let mut bar = OpenBar::new(650.0, 0.5);
        bar.place(piece(300.0));
        bar.place(piece(200.0));
        let plan = bar.close(2);
        assert_eq!(plan.bar_index, 2);
        assert_eq!(plan.waste, 149.5);
        assert!((plan.efficiency - 500.5 / 650.0 * 100.0).abs() < 1e-9);
        assert_eq!(plan.cuts.len(), 2);
    }
}
