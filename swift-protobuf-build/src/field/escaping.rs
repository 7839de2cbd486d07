use itertools::Itertools;

/// Renders `s` as a Swift string literal.
pub(super) fn swift_string_literal(s: &str) -> String {
    let mut literal = String::with_capacity(s.len() + 2);
    literal.push('"');
    for c in s.chars() {
        match c {
            '\0' => literal.push_str("\\0"),
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\'' => literal.push_str("\\'"),
            '\t' => literal.push_str("\\t"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            c if c.is_control() => literal.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Renders bytes as a Swift `Data` initializer.
pub(super) fn data_literal(bytes: &[u8]) -> String {
    format!(
        "Data(bytes: [{}])",
        bytes.iter().format_with(", ", |b, f| f(&format_args!("{:#04x}", b)))
    )
}

/// Based on [`google::protobuf::UnescapeCEscapeString`][1]
/// [1]: https://github.com/google/protobuf/blob/3.3.x/src/google/protobuf/stubs/strutil.cc#L312-L322
pub(super) fn unescape_c_escape_string(s: &str) -> Result<Vec<u8>, String> {
    let src = s.as_bytes();
    let len = src.len();
    let mut dst = Vec::new();

    let mut p = 0;

    while p < len {
        if src[p] != b'\\' {
            dst.push(src[p]);
            p += 1;
            continue;
        }

        p += 1;
        if p == len {
            return Err(format!("c-escaped value ({}) ends with '\\'", s));
        }
        match src[p] {
            b'a' => dst.push(0x07),
            b'b' => dst.push(0x08),
            b'f' => dst.push(0x0C),
            b'n' => dst.push(0x0A),
            b'r' => dst.push(0x0D),
            b't' => dst.push(0x09),
            b'v' => dst.push(0x0B),
            b'\\' => dst.push(0x5C),
            b'?' => dst.push(0x3F),
            b'\'' => dst.push(0x27),
            b'"' => dst.push(0x22),
            b'0'..=b'7' => {
                let mut octal: u32 = 0;
                for _ in 0..3 {
                    if p < len && (b'0'..=b'7').contains(&src[p]) {
                        octal = octal * 8 + u32::from(src[p] - b'0');
                        p += 1;
                    } else {
                        break;
                    }
                }
                let byte = u8::try_from(octal)
                    .map_err(|_| format!("octal escape out of range in ({})", s))?;
                dst.push(byte);
                continue;
            }
            b'x' | b'X' => {
                if p + 2 >= len {
                    return Err(format!("incomplete hex value in ({})", s));
                }
                let hex = std::str::from_utf8(&src[p + 1..p + 3])
                    .ok()
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok());
                match hex {
                    Some(b) => dst.push(b),
                    None => return Err(format!("invalid hex value in ({})", s)),
                }
                p += 2;
            }
            _ => return Err(format!("invalid escape in ({})", s)),
        }
        p += 1;
    }
    Ok(dst)
}
