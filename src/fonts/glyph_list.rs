//! Glyph name to Unicode resolution.
//!
//! Backed by the Adobe Glyph List (the names that appear in the legacy encodings and
//! the common Latin, Greek and symbol ranges) plus the ZapfDingbats `aNN` names.
//! Names outside the table resolve through the `uniXXXX` / `uXXXX[XX]` conventions
//! and by stripping a `.suffix` variant marker.
//!
//! Reference: Adobe Glyph List Specification, "Mapping a glyph name to a Unicode value".

use std::collections::HashMap;

use lazy_static::lazy_static;
use phf::phf_map;

use super::encoding::LegacyEncoding;

/// Adobe Glyph List: glyph name to Unicode scalar.
pub static ADOBE_GLYPH_LIST: phf::Map<&'static str, char> = phf_map! {
    // Basic Latin
    "space" => '\u{0020}',
    "exclam" => '\u{0021}',
    "quotedbl" => '\u{0022}',
    "numbersign" => '\u{0023}',
    "dollar" => '\u{0024}',
    "percent" => '\u{0025}',
    "ampersand" => '\u{0026}',
    "quotesingle" => '\u{0027}',
    "parenleft" => '\u{0028}',
    "parenright" => '\u{0029}',
    "asterisk" => '\u{002A}',
    "plus" => '\u{002B}',
    "comma" => '\u{002C}',
    "hyphen" => '\u{002D}',
    "period" => '\u{002E}',
    "slash" => '\u{002F}',
    "zero" => '\u{0030}',
    "one" => '\u{0031}',
    "two" => '\u{0032}',
    "three" => '\u{0033}',
    "four" => '\u{0034}',
    "five" => '\u{0035}',
    "six" => '\u{0036}',
    "seven" => '\u{0037}',
    "eight" => '\u{0038}',
    "nine" => '\u{0039}',
    "colon" => '\u{003A}',
    "semicolon" => '\u{003B}',
    "less" => '\u{003C}',
    "equal" => '\u{003D}',
    "greater" => '\u{003E}',
    "question" => '\u{003F}',
    "at" => '\u{0040}',
    "A" => '\u{0041}',
    "B" => '\u{0042}',
    "C" => '\u{0043}',
    "D" => '\u{0044}',
    "E" => '\u{0045}',
    "F" => '\u{0046}',
    "G" => '\u{0047}',
    "H" => '\u{0048}',
    "I" => '\u{0049}',
    "J" => '\u{004A}',
    "K" => '\u{004B}',
    "L" => '\u{004C}',
    "M" => '\u{004D}',
    "N" => '\u{004E}',
    "O" => '\u{004F}',
    "P" => '\u{0050}',
    "Q" => '\u{0051}',
    "R" => '\u{0052}',
    "S" => '\u{0053}',
    "T" => '\u{0054}',
    "U" => '\u{0055}',
    "V" => '\u{0056}',
    "W" => '\u{0057}',
    "X" => '\u{0058}',
    "Y" => '\u{0059}',
    "Z" => '\u{005A}',
    "bracketleft" => '\u{005B}',
    "backslash" => '\u{005C}',
    "bracketright" => '\u{005D}',
    "asciicircum" => '\u{005E}',
    "underscore" => '\u{005F}',
    "grave" => '\u{0060}',
    "a" => '\u{0061}',
    "b" => '\u{0062}',
    "c" => '\u{0063}',
    "d" => '\u{0064}',
    "e" => '\u{0065}',
    "f" => '\u{0066}',
    "g" => '\u{0067}',
    "h" => '\u{0068}',
    "i" => '\u{0069}',
    "j" => '\u{006A}',
    "k" => '\u{006B}',
    "l" => '\u{006C}',
    "m" => '\u{006D}',
    "n" => '\u{006E}',
    "o" => '\u{006F}',
    "p" => '\u{0070}',
    "q" => '\u{0071}',
    "r" => '\u{0072}',
    "s" => '\u{0073}',
    "t" => '\u{0074}',
    "u" => '\u{0075}',
    "v" => '\u{0076}',
    "w" => '\u{0077}',
    "x" => '\u{0078}',
    "y" => '\u{0079}',
    "z" => '\u{007A}',
    "braceleft" => '\u{007B}',
    "bar" => '\u{007C}',
    "braceright" => '\u{007D}',
    "asciitilde" => '\u{007E}',
    // Latin-1 Supplement
    "nbspace" => '\u{00A0}',
    "nonbreakingspace" => '\u{00A0}',
    "exclamdown" => '\u{00A1}',
    "cent" => '\u{00A2}',
    "sterling" => '\u{00A3}',
    "currency" => '\u{00A4}',
    "yen" => '\u{00A5}',
    "brokenbar" => '\u{00A6}',
    "section" => '\u{00A7}',
    "dieresis" => '\u{00A8}',
    "copyright" => '\u{00A9}',
    "ordfeminine" => '\u{00AA}',
    "guillemotleft" => '\u{00AB}',
    "logicalnot" => '\u{00AC}',
    "sfthyphen" => '\u{00AD}',
    "softhyphen" => '\u{00AD}',
    "registered" => '\u{00AE}',
    "macron" => '\u{00AF}',
    "overscore" => '\u{00AF}',
    "degree" => '\u{00B0}',
    "plusminus" => '\u{00B1}',
    "twosuperior" => '\u{00B2}',
    "threesuperior" => '\u{00B3}',
    "acute" => '\u{00B4}',
    "mu" => '\u{00B5}',
    "paragraph" => '\u{00B6}',
    "periodcentered" => '\u{00B7}',
    "middot" => '\u{00B7}',
    "cedilla" => '\u{00B8}',
    "onesuperior" => '\u{00B9}',
    "ordmasculine" => '\u{00BA}',
    "guillemotright" => '\u{00BB}',
    "onequarter" => '\u{00BC}',
    "onehalf" => '\u{00BD}',
    "threequarters" => '\u{00BE}',
    "questiondown" => '\u{00BF}',
    "Agrave" => '\u{00C0}',
    "Aacute" => '\u{00C1}',
    "Acircumflex" => '\u{00C2}',
    "Atilde" => '\u{00C3}',
    "Adieresis" => '\u{00C4}',
    "Aring" => '\u{00C5}',
    "AE" => '\u{00C6}',
    "Ccedilla" => '\u{00C7}',
    "Egrave" => '\u{00C8}',
    "Eacute" => '\u{00C9}',
    "Ecircumflex" => '\u{00CA}',
    "Edieresis" => '\u{00CB}',
    "Igrave" => '\u{00CC}',
    "Iacute" => '\u{00CD}',
    "Icircumflex" => '\u{00CE}',
    "Idieresis" => '\u{00CF}',
    "Eth" => '\u{00D0}',
    "Ntilde" => '\u{00D1}',
    "Ograve" => '\u{00D2}',
    "Oacute" => '\u{00D3}',
    "Ocircumflex" => '\u{00D4}',
    "Otilde" => '\u{00D5}',
    "Odieresis" => '\u{00D6}',
    "multiply" => '\u{00D7}',
    "Oslash" => '\u{00D8}',
    "Ugrave" => '\u{00D9}',
    "Uacute" => '\u{00DA}',
    "Ucircumflex" => '\u{00DB}',
    "Udieresis" => '\u{00DC}',
    "Yacute" => '\u{00DD}',
    "Thorn" => '\u{00DE}',
    "germandbls" => '\u{00DF}',
    "agrave" => '\u{00E0}',
    "aacute" => '\u{00E1}',
    "acircumflex" => '\u{00E2}',
    "atilde" => '\u{00E3}',
    "adieresis" => '\u{00E4}',
    "aring" => '\u{00E5}',
    "ae" => '\u{00E6}',
    "ccedilla" => '\u{00E7}',
    "egrave" => '\u{00E8}',
    "eacute" => '\u{00E9}',
    "ecircumflex" => '\u{00EA}',
    "edieresis" => '\u{00EB}',
    "igrave" => '\u{00EC}',
    "iacute" => '\u{00ED}',
    "icircumflex" => '\u{00EE}',
    "idieresis" => '\u{00EF}',
    "eth" => '\u{00F0}',
    "ntilde" => '\u{00F1}',
    "ograve" => '\u{00F2}',
    "oacute" => '\u{00F3}',
    "ocircumflex" => '\u{00F4}',
    "otilde" => '\u{00F5}',
    "odieresis" => '\u{00F6}',
    "divide" => '\u{00F7}',
    "oslash" => '\u{00F8}',
    "ugrave" => '\u{00F9}',
    "uacute" => '\u{00FA}',
    "ucircumflex" => '\u{00FB}',
    "udieresis" => '\u{00FC}',
    "yacute" => '\u{00FD}',
    "thorn" => '\u{00FE}',
    "ydieresis" => '\u{00FF}',
    // Latin Extended-A
    "Amacron" => '\u{0100}',
    "amacron" => '\u{0101}',
    "Abreve" => '\u{0102}',
    "abreve" => '\u{0103}',
    "Aogonek" => '\u{0104}',
    "aogonek" => '\u{0105}',
    "Cacute" => '\u{0106}',
    "cacute" => '\u{0107}',
    "Ccircumflex" => '\u{0108}',
    "ccircumflex" => '\u{0109}',
    "Cdotaccent" => '\u{010A}',
    "cdotaccent" => '\u{010B}',
    "Ccaron" => '\u{010C}',
    "ccaron" => '\u{010D}',
    "Dcaron" => '\u{010E}',
    "dcaron" => '\u{010F}',
    "Dcroat" => '\u{0110}',
    "dcroat" => '\u{0111}',
    "Emacron" => '\u{0112}',
    "emacron" => '\u{0113}',
    "Ebreve" => '\u{0114}',
    "ebreve" => '\u{0115}',
    "Edotaccent" => '\u{0116}',
    "edotaccent" => '\u{0117}',
    "Eogonek" => '\u{0118}',
    "eogonek" => '\u{0119}',
    "Ecaron" => '\u{011A}',
    "ecaron" => '\u{011B}',
    "Gcircumflex" => '\u{011C}',
    "gcircumflex" => '\u{011D}',
    "Gbreve" => '\u{011E}',
    "gbreve" => '\u{011F}',
    "Gdotaccent" => '\u{0120}',
    "gdotaccent" => '\u{0121}',
    "Gcommaaccent" => '\u{0122}',
    "gcommaaccent" => '\u{0123}',
    "Hcircumflex" => '\u{0124}',
    "hcircumflex" => '\u{0125}',
    "Hbar" => '\u{0126}',
    "hbar" => '\u{0127}',
    "Itilde" => '\u{0128}',
    "itilde" => '\u{0129}',
    "Imacron" => '\u{012A}',
    "imacron" => '\u{012B}',
    "Ibreve" => '\u{012C}',
    "ibreve" => '\u{012D}',
    "Iogonek" => '\u{012E}',
    "iogonek" => '\u{012F}',
    "Idotaccent" => '\u{0130}',
    "dotlessi" => '\u{0131}',
    "IJ" => '\u{0132}',
    "ij" => '\u{0133}',
    "Jcircumflex" => '\u{0134}',
    "jcircumflex" => '\u{0135}',
    "Kcommaaccent" => '\u{0136}',
    "kcommaaccent" => '\u{0137}',
    "kgreenlandic" => '\u{0138}',
    "Lacute" => '\u{0139}',
    "lacute" => '\u{013A}',
    "Lcommaaccent" => '\u{013B}',
    "lcommaaccent" => '\u{013C}',
    "Lcaron" => '\u{013D}',
    "lcaron" => '\u{013E}',
    "Ldot" => '\u{013F}',
    "ldot" => '\u{0140}',
    "Lslash" => '\u{0141}',
    "lslash" => '\u{0142}',
    "Nacute" => '\u{0143}',
    "nacute" => '\u{0144}',
    "Ncommaaccent" => '\u{0145}',
    "ncommaaccent" => '\u{0146}',
    "Ncaron" => '\u{0147}',
    "ncaron" => '\u{0148}',
    "napostrophe" => '\u{0149}',
    "Eng" => '\u{014A}',
    "eng" => '\u{014B}',
    "Omacron" => '\u{014C}',
    "omacron" => '\u{014D}',
    "Obreve" => '\u{014E}',
    "obreve" => '\u{014F}',
    "Ohungarumlaut" => '\u{0150}',
    "ohungarumlaut" => '\u{0151}',
    "OE" => '\u{0152}',
    "oe" => '\u{0153}',
    "Racute" => '\u{0154}',
    "racute" => '\u{0155}',
    "Rcommaaccent" => '\u{0156}',
    "rcommaaccent" => '\u{0157}',
    "Rcaron" => '\u{0158}',
    "rcaron" => '\u{0159}',
    "Sacute" => '\u{015A}',
    "sacute" => '\u{015B}',
    "Scircumflex" => '\u{015C}',
    "scircumflex" => '\u{015D}',
    "Scedilla" => '\u{015E}',
    "scedilla" => '\u{015F}',
    "Scaron" => '\u{0160}',
    "scaron" => '\u{0161}',
    "Tcommaaccent" => '\u{0162}',
    "tcommaaccent" => '\u{0163}',
    "Tcaron" => '\u{0164}',
    "tcaron" => '\u{0165}',
    "Tbar" => '\u{0166}',
    "tbar" => '\u{0167}',
    "Utilde" => '\u{0168}',
    "utilde" => '\u{0169}',
    "Umacron" => '\u{016A}',
    "umacron" => '\u{016B}',
    "Ubreve" => '\u{016C}',
    "ubreve" => '\u{016D}',
    "Uring" => '\u{016E}',
    "uring" => '\u{016F}',
    "Uhungarumlaut" => '\u{0170}',
    "uhungarumlaut" => '\u{0171}',
    "Uogonek" => '\u{0172}',
    "uogonek" => '\u{0173}',
    "Wcircumflex" => '\u{0174}',
    "wcircumflex" => '\u{0175}',
    "Ycircumflex" => '\u{0176}',
    "ycircumflex" => '\u{0177}',
    "Ydieresis" => '\u{0178}',
    "Zacute" => '\u{0179}',
    "zacute" => '\u{017A}',
    "Zdotaccent" => '\u{017B}',
    "zdotaccent" => '\u{017C}',
    "Zcaron" => '\u{017D}',
    "zcaron" => '\u{017E}',
    "longs" => '\u{017F}',
    // Latin Extended-B and additional
    "florin" => '\u{0192}',
    "Ohorn" => '\u{01A0}',
    "ohorn" => '\u{01A1}',
    "Uhorn" => '\u{01AF}',
    "uhorn" => '\u{01B0}',
    "Gcaron" => '\u{01E6}',
    "gcaron" => '\u{01E7}',
    "Aringacute" => '\u{01FA}',
    "aringacute" => '\u{01FB}',
    "AEacute" => '\u{01FC}',
    "aeacute" => '\u{01FD}',
    "Oslashacute" => '\u{01FE}',
    "oslashacute" => '\u{01FF}',
    "Scommaaccent" => '\u{0218}',
    "scommaaccent" => '\u{0219}',
    "Wgrave" => '\u{1E80}',
    "wgrave" => '\u{1E81}',
    "Wacute" => '\u{1E82}',
    "wacute" => '\u{1E83}',
    "Wdieresis" => '\u{1E84}',
    "wdieresis" => '\u{1E85}',
    "Ygrave" => '\u{1EF2}',
    "ygrave" => '\u{1EF3}',
    // Spacing modifiers
    "circumflex" => '\u{02C6}',
    "caron" => '\u{02C7}',
    "breve" => '\u{02D8}',
    "dotaccent" => '\u{02D9}',
    "ring" => '\u{02DA}',
    "ogonek" => '\u{02DB}',
    "tilde" => '\u{02DC}',
    "hungarumlaut" => '\u{02DD}',
    // Greek
    "tonos" => '\u{0384}',
    "dieresistonos" => '\u{0385}',
    "Alpha" => '\u{0391}',
    "Beta" => '\u{0392}',
    "Gamma" => '\u{0393}',
    "Delta" => '\u{0394}',
    "Epsilon" => '\u{0395}',
    "Zeta" => '\u{0396}',
    "Eta" => '\u{0397}',
    "Theta" => '\u{0398}',
    "Iota" => '\u{0399}',
    "Kappa" => '\u{039A}',
    "Lambda" => '\u{039B}',
    "Mu" => '\u{039C}',
    "Nu" => '\u{039D}',
    "Xi" => '\u{039E}',
    "Omicron" => '\u{039F}',
    "Pi" => '\u{03A0}',
    "Rho" => '\u{03A1}',
    "Sigma" => '\u{03A3}',
    "Tau" => '\u{03A4}',
    "Upsilon" => '\u{03A5}',
    "Phi" => '\u{03A6}',
    "Chi" => '\u{03A7}',
    "Psi" => '\u{03A8}',
    "Omega" => '\u{03A9}',
    "alpha" => '\u{03B1}',
    "beta" => '\u{03B2}',
    "gamma" => '\u{03B3}',
    "delta" => '\u{03B4}',
    "epsilon" => '\u{03B5}',
    "zeta" => '\u{03B6}',
    "eta" => '\u{03B7}',
    "theta" => '\u{03B8}',
    "iota" => '\u{03B9}',
    "kappa" => '\u{03BA}',
    "lambda" => '\u{03BB}',
    "nu" => '\u{03BD}',
    "xi" => '\u{03BE}',
    "omicron" => '\u{03BF}',
    "pi" => '\u{03C0}',
    "rho" => '\u{03C1}',
    "sigma1" => '\u{03C2}',
    "sigma" => '\u{03C3}',
    "tau" => '\u{03C4}',
    "upsilon" => '\u{03C5}',
    "phi" => '\u{03C6}',
    "chi" => '\u{03C7}',
    "psi" => '\u{03C8}',
    "omega" => '\u{03C9}',
    "theta1" => '\u{03D1}',
    "Upsilon1" => '\u{03D2}',
    "phi1" => '\u{03D5}',
    "omega1" => '\u{03D6}',
    // General punctuation
    "figuredash" => '\u{2012}',
    "endash" => '\u{2013}',
    "emdash" => '\u{2014}',
    "afii00208" => '\u{2015}',
    "underscoredbl" => '\u{2017}',
    "quoteleft" => '\u{2018}',
    "quoteright" => '\u{2019}',
    "quotesinglbase" => '\u{201A}',
    "quotereversed" => '\u{201B}',
    "quotedblleft" => '\u{201C}',
    "quotedblright" => '\u{201D}',
    "quotedblbase" => '\u{201E}',
    "dagger" => '\u{2020}',
    "daggerdbl" => '\u{2021}',
    "bullet" => '\u{2022}',
    "onedotenleader" => '\u{2024}',
    "twodotenleader" => '\u{2025}',
    "ellipsis" => '\u{2026}',
    "perthousand" => '\u{2030}',
    "minute" => '\u{2032}',
    "second" => '\u{2033}',
    "guilsinglleft" => '\u{2039}',
    "guilsinglright" => '\u{203A}',
    "exclamdbl" => '\u{203C}',
    "fraction" => '\u{2044}',
    // Currency and letterlike
    "colonmonetary" => '\u{20A1}',
    "franc" => '\u{20A3}',
    "lira" => '\u{20A4}',
    "peseta" => '\u{20A7}',
    "Euro" => '\u{20AC}',
    "afii61248" => '\u{2105}',
    "afii61289" => '\u{2113}',
    "afii61352" => '\u{2116}',
    "Ifraktur" => '\u{2111}',
    "weierstrass" => '\u{2118}',
    "Rfraktur" => '\u{211C}',
    "prescription" => '\u{211E}',
    "trademark" => '\u{2122}',
    "estimated" => '\u{212E}',
    "aleph" => '\u{2135}',
    "onethird" => '\u{2153}',
    "twothirds" => '\u{2154}',
    "oneeighth" => '\u{215B}',
    "threeeighths" => '\u{215C}',
    "fiveeighths" => '\u{215D}',
    "seveneighths" => '\u{215E}',
    // Arrows
    "arrowleft" => '\u{2190}',
    "arrowup" => '\u{2191}',
    "arrowright" => '\u{2192}',
    "arrowdown" => '\u{2193}',
    "arrowboth" => '\u{2194}',
    "arrowupdn" => '\u{2195}',
    "arrowupdnbse" => '\u{21A8}',
    "carriagereturn" => '\u{21B5}',
    "arrowdblleft" => '\u{21D0}',
    "arrowdblup" => '\u{21D1}',
    "arrowdblright" => '\u{21D2}',
    "arrowdbldown" => '\u{21D3}',
    "arrowdblboth" => '\u{21D4}',
    // Mathematical operators
    "universal" => '\u{2200}',
    "partialdiff" => '\u{2202}',
    "existential" => '\u{2203}',
    "emptyset" => '\u{2205}',
    "gradient" => '\u{2207}',
    "element" => '\u{2208}',
    "notelement" => '\u{2209}',
    "suchthat" => '\u{220B}',
    "product" => '\u{220F}',
    "summation" => '\u{2211}',
    "minus" => '\u{2212}',
    "asteriskmath" => '\u{2217}',
    "radical" => '\u{221A}',
    "proportional" => '\u{221D}',
    "infinity" => '\u{221E}',
    "orthogonal" => '\u{221F}',
    "angle" => '\u{2220}',
    "logicaland" => '\u{2227}',
    "logicalor" => '\u{2228}',
    "intersection" => '\u{2229}',
    "union" => '\u{222A}',
    "integral" => '\u{222B}',
    "therefore" => '\u{2234}',
    "similar" => '\u{223C}',
    "congruent" => '\u{2245}',
    "approxequal" => '\u{2248}',
    "notequal" => '\u{2260}',
    "equivalence" => '\u{2261}',
    "lessequal" => '\u{2264}',
    "greaterequal" => '\u{2265}',
    "propersubset" => '\u{2282}',
    "propersuperset" => '\u{2283}',
    "notsubset" => '\u{2284}',
    "reflexsubset" => '\u{2286}',
    "reflexsuperset" => '\u{2287}',
    "circleplus" => '\u{2295}',
    "circlemultiply" => '\u{2297}',
    "perpendicular" => '\u{22A5}',
    "dotmath" => '\u{22C5}',
    "house" => '\u{2302}',
    "revlogicalnot" => '\u{2310}',
    "integraltp" => '\u{2320}',
    "integralbt" => '\u{2321}',
    "angleleft" => '\u{2329}',
    "angleright" => '\u{232A}',
    // Shapes and miscellaneous symbols
    "SF100000" => '\u{2500}',
    "SF110000" => '\u{2502}',
    "filledbox" => '\u{25A0}',
    "H22073" => '\u{25A1}',
    "filledrect" => '\u{25AC}',
    "triagup" => '\u{25B2}',
    "triagrt" => '\u{25BA}',
    "triagdn" => '\u{25BC}',
    "triaglf" => '\u{25C4}',
    "lozenge" => '\u{25CA}',
    "circle" => '\u{25CB}',
    "H18533" => '\u{25CF}',
    "invbullet" => '\u{25D8}',
    "invcircle" => '\u{25D9}',
    "openbullet" => '\u{25E6}',
    "smileface" => '\u{263A}',
    "invsmileface" => '\u{263B}',
    "sun" => '\u{263C}',
    "female" => '\u{2640}',
    "male" => '\u{2642}',
    "spade" => '\u{2660}',
    "club" => '\u{2663}',
    "heart" => '\u{2665}',
    "diamond" => '\u{2666}',
    "musicalnote" => '\u{266A}',
    "musicalnotedbl" => '\u{266B}',
    // Private use (Symbol font pieces)
    "radicalex" => '\u{F8E5}',
    "arrowvertex" => '\u{F8E6}',
    "arrowhorizex" => '\u{F8E7}',
    "registersans" => '\u{F8E8}',
    "copyrightsans" => '\u{F8E9}',
    "trademarksans" => '\u{F8EA}',
    "parenlefttp" => '\u{F8EB}',
    "parenleftex" => '\u{F8EC}',
    "parenleftbt" => '\u{F8ED}',
    "bracketlefttp" => '\u{F8EE}',
    "bracketleftex" => '\u{F8EF}',
    "bracketleftbt" => '\u{F8F0}',
    "bracelefttp" => '\u{F8F1}',
    "braceleftmid" => '\u{F8F2}',
    "braceleftbt" => '\u{F8F3}',
    "braceex" => '\u{F8F4}',
    "integralex" => '\u{F8F5}',
    "parenrighttp" => '\u{F8F6}',
    "parenrightex" => '\u{F8F7}',
    "parenrightbt" => '\u{F8F8}',
    "bracketrighttp" => '\u{F8F9}',
    "bracketrightex" => '\u{F8FA}',
    "bracketrightbt" => '\u{F8FB}',
    "bracerighttp" => '\u{F8FC}',
    "bracerightmid" => '\u{F8FD}',
    "bracerightbt" => '\u{F8FE}',
    "apple" => '\u{F8FF}',
    "copyrightserif" => '\u{F6D9}',
    "registerserif" => '\u{F6DA}',
    "trademarkserif" => '\u{F6DB}',
    "commaaccent" => '\u{F6C3}',
    // Alphabetic presentation forms
    "ff" => '\u{FB00}',
    "fi" => '\u{FB01}',
    "fl" => '\u{FB02}',
    "ffi" => '\u{FB03}',
    "ffl" => '\u{FB04}',
};

lazy_static! {
    /// Unicode scalar to preferred glyph name (shortest, then alphabetically first).
    static ref UNICODE_TO_GLYPH: HashMap<char, &'static str> = {
        let mut map: HashMap<char, &'static str> = HashMap::with_capacity(ADOBE_GLYPH_LIST.len());
        for (&name, &c) in ADOBE_GLYPH_LIST.entries() {
            map.entry(c)
                .and_modify(|current| {
                    if (name.len(), name) < (current.len(), *current) {
                        *current = name;
                    }
                })
                .or_insert(name);
        }
        map
    };
}

/// Resolve a glyph name to its Unicode scalar.
///
/// Resolution order:
/// 1. Adobe Glyph List
/// 2. ZapfDingbats names (`a1` .. `a206`)
/// 3. `uniXXXX` (exactly four hex digits, no surrogates)
/// 4. `uXXXX` .. `uXXXXXX`
/// 5. the same steps on the part before the first `.` (`a.sc`, `one.oldstyle`)
///
/// Ligature names (`f_f_i`, `uni00660069`) have no single scalar and return `None`.
pub fn name_to_unicode(name: &str) -> Option<char> {
    if let Some(c) = lookup(name) {
        return Some(c);
    }

    if let Some(dot) = name.find('.') {
        if dot > 0 {
            return lookup(&name[..dot]);
        }
    }

    log::trace!("Glyph name '{}' has no Unicode value", name);
    None
}

fn lookup(name: &str) -> Option<char> {
    if let Some(&c) = ADOBE_GLYPH_LIST.get(name) {
        return Some(c);
    }

    if let Some(c) = LegacyEncoding::ZapfDingbats.unicode_for_name(name) {
        return Some(c);
    }

    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() == 4 {
            return parse_scalar(hex);
        }
        return None;
    }

    if let Some(hex) = name.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) {
            return parse_scalar(hex);
        }
    }

    None
}

fn parse_scalar(hex: &str) -> Option<char> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    // Uppercase digits only per AGL, but lowercase is common in the wild.
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Preferred Adobe glyph name for a scalar, if it has one.
pub fn unicode_to_name(c: char) -> Option<&'static str> {
    UNICODE_TO_GLYPH.get(&c).copied()
}

/// Glyph name for a scalar, synthesizing `uniXXXX` / `uXXXXXX` when the table has none.
pub fn glyph_name_for(c: char) -> String {
    match unicode_to_name(c) {
        Some(name) => name.to_string(),
        None if (c as u32) <= 0xFFFF => format!("uni{:04X}", c as u32),
        None => format!("u{:06X}", c as u32),
    }
}
