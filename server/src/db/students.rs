//! Students table, seeded at startup.

use classboard_engine::{Student, StudentId};
use dashmap::DashMap;

const ROSTER: [&str; 5] = [
    "Askerbek Dyusupov",
    "Vladislav Isaev",
    "Mikhail Laas",
    "Nurbai Nurmoldin",
    "Roman Shaunin",
];

pub struct StudentsTable {
    rows: DashMap<StudentId, Student>,
}

impl StudentsTable {
    /// The fixed roster: unmarked, grade 0, offline.
    pub fn seeded() -> Self {
        let rows = DashMap::new();
        for (id, name) in (1..).zip(ROSTER) {
            rows.insert(id, Student::new(id, name));
        }
        Self { rows }
    }

    /// All students in id order.
    pub fn list(&self) -> Vec<Student> {
        let mut students: Vec<Student> = self.rows.iter().map(|r| r.value().clone()).collect();
        students.sort_by_key(|s| s.id);
        students
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Modify one student in place and return the result.
    pub fn modify(&self, id: StudentId, f: impl FnOnce(&mut Student)) -> Option<Student> {
        let mut row = self.rows.get_mut(&id)?;
        f(row.value_mut());
        Some(row.value().clone())
    }
}
