/// A Peruvian department as it appears in the CSV and the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: u32,
    pub name: &'static str,
}

/// Region selected when nothing else is configured (Amazonas)
pub const DEFAULT_REGION: u32 = 1;

/// Fixed department table, ordered by ascending code
pub static REGIONS: [Region; 25] = [
    Region { code: 1, name: "Amazonas" },
    Region { code: 2, name: "Áncash" },
    Region { code: 3, name: "Apurímac" },
    Region { code: 4, name: "Arequipa" },
    Region { code: 5, name: "Ayacucho" },
    Region { code: 6, name: "Cajamarca" },
    Region { code: 7, name: "Callao" },
    Region { code: 8, name: "Cusco" },
    Region { code: 9, name: "Huancavelica" },
    Region { code: 10, name: "Huánuco" },
    Region { code: 11, name: "Ica" },
    Region { code: 12, name: "Junín" },
    Region { code: 13, name: "La Libertad" },
    Region { code: 14, name: "Lambayeque" },
    Region { code: 15, name: "Lima" },
    Region { code: 16, name: "Loreto" },
    Region { code: 17, name: "Madre de Dios" },
    Region { code: 18, name: "Moquegua" },
    Region { code: 19, name: "Pasco" },
    Region { code: 20, name: "Piura" },
    Region { code: 21, name: "Puno" },
    Region { code: 22, name: "San Martín" },
    Region { code: 23, name: "Tacna" },
    Region { code: 24, name: "Tumbes" },
    Region { code: 25, name: "Ucayali" },
];

/// Look up a region by code
pub fn region(code: u32) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.code == code)
}

/// Name for a region code, if the code is in the table
pub fn region_name(code: u32) -> Option<&'static str> {
    region(code).map(|r| r.name)
}

/// Reverse lookup: exact name to code
pub fn region_code(name: &str) -> Option<u32> {
    REGIONS.iter().find(|r| r.name == name).map(|r| r.code)
}

/// Region from user input: a numeric code or an exact name
pub fn parse_region(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.parse().ok().or_else(|| region_code(raw))
}

pub fn is_known_region(code: u32) -> bool {
    region(code).is_some()
}

/// Position of a code within the table, used by the selector list
pub fn region_index(code: u32) -> Option<usize> {
    REGIONS.iter().position(|r| r.code == code)
}
