//! Synthetic font programs for integration tests.

#![allow(dead_code)]

fn be16(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// sfnt container holding `tables` in the given order.
pub fn sfnt(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let header_len = 12 + 16 * tables.len();
    let mut directory = vec![0x00, 0x01, 0x00, 0x00];
    directory.extend(be16(&[tables.len() as u16, 0, 0, 0]));
    let mut body = Vec::new();
    for (tag, data) in tables {
        directory.extend_from_slice(&tag[..]);
        directory.extend_from_slice(&[0; 4]);
        directory.extend_from_slice(&((header_len + body.len()) as u32).to_be_bytes());
        directory.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);
        body.resize(body.len().next_multiple_of(4), 0);
    }
    directory.extend(body);
    directory
}

/// TrueType font mapping `first..first + glyphs.len()` to the given glyph ids
/// through a (3,1) format 6 cmap. `advances[g]` is the width of glyph `g` at
/// `units_per_em`.
pub fn truetype(first: u16, glyphs: &[u16], advances: &[u16], units_per_em: u16) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[18..20].copy_from_slice(&units_per_em.to_be_bytes());
    // bbox -100 -300 1100 950 in font units
    head[36..44].copy_from_slice(&be16(&[(-100i16) as u16, (-300i16) as u16, 1100, 950]));

    let mut hhea = vec![0u8; 36];
    hhea[4..6].copy_from_slice(&(units_per_em * 4 / 5).to_be_bytes());
    hhea[6..8].copy_from_slice(&(-((units_per_em / 5) as i16)).to_be_bytes());
    hhea[34..36].copy_from_slice(&(advances.len() as u16).to_be_bytes());

    let mut maxp = vec![0, 0, 0x50, 0];
    maxp.extend(be16(&[advances.len() as u16]));

    let hmtx: Vec<u8> = advances.iter().flat_map(|&a| be16(&[a, 0])).collect();

    let mut subtable = be16(&[6, (10 + 2 * glyphs.len()) as u16, 0, first, glyphs.len() as u16]);
    subtable.extend(be16(glyphs));
    let mut cmap = be16(&[0, 1, 3, 1]);
    cmap.extend_from_slice(&12u32.to_be_bytes());
    cmap.extend(subtable);

    sfnt(&[
        (b"cmap", cmap),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"maxp", maxp),
    ])
}

/// Printable ASCII font: U+0020..=U+007E on glyphs 1..=95, glyph `g` is
/// `400 + 5 * g` units wide at 1000 units per em.
pub fn ascii_font() -> Vec<u8> {
    let glyphs: Vec<u16> = (1..=95).collect();
    let advances: Vec<u16> = (0..=95).map(|g| 400 + 5 * g).collect();
    truetype(0x20, &glyphs, &advances, 1000)
}

pub const AFM: &str = "StartFontMetrics 4.1
FontName Sample-Roman
Weight Bold
ItalicAngle 0
IsFixedPitch false
FontBBox -168 -218 1000 898
EncodingScheme AdobeStandardEncoding
CapHeight 662
XHeight 450
Ascender 683
Descender -217
StartCharMetrics 7
C 32 ; WX 250 ; N space ;
C 65 ; WX 722 ; N A ;
C 84 ; WX 611 ; N T ;
C 86 ; WX 722 ; N V ;
C 111 ; WX 500 ; N o ;
C 225 ; WX 889 ; N AE ;
C -1 ; WX 500 ; N Euro ;
EndCharMetrics
StartKernData
StartKernPairs 3
KPX A V -135
KPX T o -80
KPX V A -129
EndKernPairs
EndKernData
EndFontMetrics
";
