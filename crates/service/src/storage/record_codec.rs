use models::{Address, Employee};

/// Fields per line: 8 employee fields followed by 5 address fields.
pub const FIELD_COUNT: usize = 13;
pub const SEPARATOR: &str = "|";

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDefect {
    /// Split into this many fields instead of 13.
    FieldCount(usize),
    /// Bytes that are not UTF-8 (e.g. a Latin-1 export).
    InvalidUtf8,
}

/// A line skipped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based
    pub line_no: usize,
    pub defect: LineDefect,
    /// Lossy rendering of the line.
    pub raw: String,
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub records: Vec<Employee>,
    pub malformed: Vec<MalformedLine>,
}

/// Name|Cpf|WorkCard|NationalId|Role|Department|Room|Phone|Uf|City|Neighborhood|Number|PostalCode
pub fn encode_line(e: &Employee) -> String {
    let a = &e.address;
    [
        e.name.as_str(),
        e.cpf.as_str(),
        e.work_card.as_str(),
        e.national_id.as_str(),
        e.role.as_str(),
        e.department.as_str(),
        e.room.as_str(),
        e.phone.as_str(),
        a.uf.as_str(),
        a.city.as_str(),
        a.neighborhood.as_str(),
        a.number.as_str(),
        a.postal_code.as_str(),
    ]
    .join(SEPARATOR)
}

/// Decode one line; on a wrong field count returns the count found.
pub fn decode_line(line: &str) -> Result<Employee, usize> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let &[name, cpf, work_card, national_id, role, department, room, phone, uf, city, neighborhood, number, postal_code] =
        fields.as_slice()
    else {
        return Err(fields.len());
    };
    Ok(Employee {
        name: name.to_owned(),
        cpf: cpf.to_owned(),
        work_card: work_card.to_owned(),
        national_id: national_id.to_owned(),
        role: role.to_owned(),
        department: department.to_owned(),
        room: room.to_owned(),
        phone: phone.to_owned(),
        address: Address {
            uf: uf.to_owned(),
            city: city.to_owned(),
            neighborhood: neighborhood.to_owned(),
            number: number.to_owned(),
            postal_code: postal_code.to_owned(),
        },
    })
}

/// Split raw file bytes into lines the way `str::lines` does: `\n` or
/// `\r\n` terminated, no trailing empty line.
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let content = content.strip_suffix(b"\n").unwrap_or(content);
    content
        .split(|&b| b == b'\n')
        .filter(move |_| !content.is_empty())
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Decode a whole file. Each line is decoded on its own, so a line with a
/// wrong field count or non-UTF-8 bytes is collected and never fatal.
pub fn decode_document(content: &[u8]) -> Decoded {
    let mut out = Decoded::default();
    for (idx, bytes) in split_lines(content).enumerate() {
        let line_no = idx + 1;
        let Ok(line) = std::str::from_utf8(bytes) else {
            out.malformed.push(MalformedLine {
                line_no,
                defect: LineDefect::InvalidUtf8,
                raw: String::from_utf8_lossy(bytes).into_owned(),
            });
            continue;
        };
        match decode_line(line) {
            Ok(e) => out.records.push(e),
            Err(n) => out.malformed.push(MalformedLine {
                line_no,
                defect: LineDefect::FieldCount(n),
                raw: line.to_owned(),
            }),
        }
    }
    out
}

/// One `\n`-terminated line per record, in the given order.
pub fn encode_document(records: &[Employee]) -> String {
    records.iter().fold(String::new(), |mut out, e| {
        out.push_str(&encode_line(e));
        out.push('\n');
        out
    })
}
