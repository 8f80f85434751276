// Builders for small on-disk TIGER/Line datasets.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const VERSION_2002: &str = "1002";

/// 228-byte type 1 record with endpoints in millionths of a degree.
pub fn rt1_line(code: &str, tlid: u64, name: &str, from: (i64, i64), to: (i64, i64)) -> String {
    let head = format!("1{code}{tlid:>10} A  {name:<30}");
    let mut line = format!("{head:<190}");
    line.push_str(&format!("{:>+10}{:>+9}{:>+10}{:>+9}", from.0, from.1, to.0, to.1));
    assert_eq!(line.len(), 228);
    line
}

/// 208-byte type 2 record; unused point slots are zero-filled.
pub fn rt2_line(code: &str, tlid: u64, rtsq: u32, points: &[(i64, i64)]) -> String {
    let mut line = format!("2{code}{tlid:>10}{rtsq:>3}");
    for i in 0..10 {
        let (x, y) = points.get(i).copied().unwrap_or((0, 0));
        line.push_str(&format!("{x:>+10}{y:>+9}"));
    }
    assert_eq!(line.len(), 208);
    line
}

/// 58-byte type 4 record.
pub fn rt4_line(code: &str, tlid: u64, rtsq: u32, feats: [u32; 5]) -> String {
    let line = format!(
        "4{code}{tlid:>10}{rtsq:>3}{:>8}{:>8}{:>8}{:>8}{:>8}",
        feats[0], feats[1], feats[2], feats[3], feats[4]
    );
    assert_eq!(line.len(), 58);
    line
}

pub fn write_lines(dir: &Path, file: &str, lines: &[String]) {
    let mut body = lines.join("\r\n");
    body.push_str("\r\n");
    fs::write(dir.join(file), body).expect("write module file");
}

/// Two modules: 01001 with 3 alternate-name records and 01003 with 5.
pub fn alt_name_dataset(dir: &Path) {
    write_lines(
        dir,
        "TGR01001.RT1",
        &[rt1_line(VERSION_2002, 1, "Main", (-86_000_000, 32_000_000), (-86_000_001, 32_000_001))],
    );
    write_lines(
        dir,
        "TGR01003.RT1",
        &[rt1_line(VERSION_2002, 50, "Oak", (-87_000_000, 31_000_000), (-87_000_001, 31_000_001))],
    );
    let first: Vec<String> = (1..=3)
        .map(|rtsq| rt4_line(VERSION_2002, 1, rtsq, [100 + rtsq, 0, 0, 0, 0]))
        .collect();
    let second: Vec<String> = (1..=5)
        .map(|rtsq| rt4_line(VERSION_2002, 50, rtsq, [200 + rtsq, 300, 0, 0, 0]))
        .collect();
    write_lines(dir, "TGR01001.RT4", &first);
    write_lines(dir, "TGR01003.RT4", &second);
}
