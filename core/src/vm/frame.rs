//! Frame-size scanning.

use super::Instruction;

/// Result of scanning a contiguous run of `Alloc` instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScan {
    /// Sum of the `Alloc` immediates in the run.
    pub cells: i32,
    /// Address just past the run.
    pub next: usize,
}

/// Sum the sizes of the `Alloc` run starting at `start`.
///
/// A function entry is `Alloc(0)` followed by one `Alloc` per declaration
/// group, so scanning from an entry address yields the function's declared
/// local count and the address of its first statement. A `start` that is not
/// an `Alloc` (or lies past the end) yields `{ cells: 0, next: start }`.
pub fn scan_frame(instructions: &[Instruction], start: usize) -> FrameScan {
    let mut cells = 0i32;
    let mut next = start;
    while let Some(Instruction::Alloc(n)) = instructions.get(next) {
        cells = cells.wrapping_add(*n);
        next += 1;
    }
    FrameScan { cells, next }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::Instruction::*;

    #[test]
    fn test_scan_sums_run() {
        let code = [Ldi(1), Halt, Alloc(2), Alloc(0), Alloc(3), Lds(1)];
        assert_eq!(scan_frame(&code, 2), FrameScan { cells: 5, next: 5 });
    }

    #[test]
    fn test_scan_stops_at_end() {
        let code = [Alloc(0), Alloc(4)];
        assert_eq!(scan_frame(&code, 0), FrameScan { cells: 4, next: 2 });
    }

    #[test]
    fn test_scan_not_an_alloc() {
        let code = [Alloc(1), Nop, Alloc(1)];
        assert_eq!(scan_frame(&code, 1), FrameScan { cells: 0, next: 1 });
        assert_eq!(scan_frame(&code, 7), FrameScan { cells: 0, next: 7 });
    }

    #[test]
    fn test_scan_from_middle_of_run() {
        let code = [Alloc(0), Alloc(2), Alloc(3), Out];
        assert_eq!(scan_frame(&code, 1), FrameScan { cells: 5, next: 3 });
    }
}
