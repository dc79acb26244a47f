//! Advance width from a Type 2 charstring.
//!
//! The width is an optional extra operand in front of the first stack-clearing
//! operator. It is present when that operator sees one more argument than it takes:
//!
//! | operator                              | arguments       |
//! |---------------------------------------|-----------------|
//! | hstem, vstem, hstemhm, vstemhm, masks | even            |
//! | rmoveto                               | 2               |
//! | hmoveto, vmoveto                      | 1               |
//! | endchar                               | 0 or 4 (seac)   |
//!
//! The stored value is relative to the Private DICT's `nominalWidthX`; a glyph with
//! no width operand uses `defaultWidthX`. Only the glyph's own charstring is
//! inspected, so a width hidden behind a subroutine call falls back to the default.

const HSTEM: u8 = 1;
const VSTEM: u8 = 3;
const VMOVETO: u8 = 4;
const CALLSUBR: u8 = 10;
const ESCAPE: u8 = 12;
const ENDCHAR: u8 = 14;
const HSTEMHM: u8 = 18;
const HINTMASK: u8 = 19;
const CNTRMASK: u8 = 20;
const RMOVETO: u8 = 21;
const HMOVETO: u8 = 22;
const VSTEMHM: u8 = 23;
const CALLGSUBR: u8 = 29;

/// Width operand of a charstring, `None` when the glyph uses `defaultWidthX`.
pub(crate) fn width_operand(charstring: &[u8]) -> Option<f64> {
    let mut stack: Vec<f64> = Vec::new();
    let mut i = 0;

    while i < charstring.len() {
        let b0 = charstring[i];
        match b0 {
            28 => {
                let bytes = charstring.get(i + 1..i + 3)?;
                stack.push(f64::from(i16::from_be_bytes([bytes[0], bytes[1]])));
                i += 3;
            },
            32..=246 => {
                stack.push(f64::from(b0) - 139.0);
                i += 1;
            },
            247..=250 => {
                let b1 = *charstring.get(i + 1)?;
                stack.push((f64::from(b0) - 247.0) * 256.0 + f64::from(b1) + 108.0);
                i += 2;
            },
            251..=254 => {
                let b1 = *charstring.get(i + 1)?;
                stack.push(-(f64::from(b0) - 251.0) * 256.0 - f64::from(b1) - 108.0);
                i += 2;
            },
            255 => {
                let bytes = charstring.get(i + 1..i + 5)?;
                let fixed = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                stack.push(f64::from(fixed) / 65536.0);
                i += 5;
            },
            HSTEM | VSTEM | HSTEMHM | VSTEMHM | HINTMASK | CNTRMASK => {
                return (stack.len() % 2 == 1).then(|| stack[0]);
            },
            RMOVETO => return (stack.len() > 2).then(|| stack[0]),
            HMOVETO | VMOVETO => return (stack.len() > 1).then(|| stack[0]),
            ENDCHAR => return (stack.len() == 1 || stack.len() == 5).then(|| stack[0]),
            CALLSUBR | CALLGSUBR => {
                log::trace!("Width lookup stopped at subroutine call");
                return None;
            },
            ESCAPE => {
                // No escaped operator precedes the first stack-clearing operator in a
                // well-formed charstring
                return None;
            },
            _ => return None,
        }
    }
    None
}

/// Advance width in font units.
pub(crate) fn advance_width(charstring: &[u8], nominal_width_x: f64, default_width_x: f64) -> f64 {
    match width_operand(charstring) {
        Some(w) => nominal_width_x + w,
        None => default_width_x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endchar_only() {
        // No width: .notdef drawn as nothing
        assert_eq!(width_operand(&[ENDCHAR]), None);
        // Width 50 then endchar
        assert_eq!(width_operand(&[189, ENDCHAR]), Some(50.0));
    }

    #[test]
    fn test_rmoveto_with_width() {
        // -10 (w), 100 0 rmoveto
        let cs = [129, 239, 139, RMOVETO, ENDCHAR];
        assert_eq!(width_operand(&cs), Some(-10.0));
        let cs = [239, 139, RMOVETO, ENDCHAR];
        assert_eq!(width_operand(&cs), None);
    }

    #[test]
    fn test_hstem_odd_count() {
        // 120 (w), 0 20 hstem
        let cs = [247, 12, 139, 159, HSTEM];
        assert_eq!(width_operand(&cs), Some(120.0));
    }

    #[test]
    fn test_advance_relative_to_nominal() {
        let cs = [189, ENDCHAR];
        assert_eq!(advance_width(&cs, 500.0, 250.0), 550.0);
        assert_eq!(advance_width(&[ENDCHAR], 500.0, 250.0), 250.0);
    }

    #[test]
    fn test_subroutine_call_falls_back() {
        let cs = [139, CALLSUBR];
        assert_eq!(advance_width(&cs, 0.0, 333.0), 333.0);
    }
}
