use super::domain::StudentRecord;

/// Records loaded at process start: (name, korean, english, math, science).
const SEED: [(&str, u8, u8, u8, u8); 10] = [
    ("정약용", 85, 90, 80, 75),
    ("이순신", 78, 82, 90, 88),
    ("이율곡", 92, 85, 87, 95),
    ("홍길동", 80, 76, 70, 82),
    ("신사임당", 95, 98, 94, 99),
    ("최무선", 73, 70, 78, 80),
    ("장영실", 88, 89, 85, 92),
    ("김유신", 77, 75, 73, 70),
    ("안중근", 84, 83, 80, 79),
    ("세종대왕", 99, 97, 98, 96),
];

pub fn seed_records() -> Vec<StudentRecord> {
    SEED.iter()
        .map(|&(name, korean, english, math, science)| StudentRecord::new(name, korean, english, math, science))
        .collect()
}
