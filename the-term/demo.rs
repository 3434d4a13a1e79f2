//! Built-in dataset used when no seed file is given: twenty companies, each
//! with a few departments and people, repeated four times.

use the_table::{
  Row,
  SeedData,
};

const COMPANIES: &[(&str, &str)] = &[
  ("Acme Corporation", "12 Canyon Rd, Phoenix"),
  ("Globex", "3 Cypress Creek, Springfield"),
  ("Initech", "4120 Freidrich Ln, Austin"),
  ("Umbrella", "1 Raccoon Plaza, Raccoon City"),
  ("Hooli", "1 Hooli Way, Palo Alto"),
  ("Stark Industries", "10880 Malibu Point, Malibu"),
  ("Wayne Enterprises", "1007 Mountain Dr, Gotham"),
  ("Soylent", "88 Green St, New York"),
  ("Vandelay Industries", "129 W 81st St, New York"),
  ("Wonka Industries", "1 Chocolate Ave, Bristol"),
  ("Cyberdyne Systems", "18144 El Camino Real, Sunnyvale"),
  ("Tyrell Corporation", "2019 Spinner Blvd, Los Angeles"),
  ("Oscorp", "590 Madison Ave, New York"),
  ("Monsters Inc", "1 Scare Floor, Monstropolis"),
  ("Pied Piper", "5230 Newell Rd, Palo Alto"),
  ("Dunder Mifflin", "1725 Slough Ave, Scranton"),
  ("Prestige Worldwide", "21 Catalina Wine Mixer, Los Angeles"),
  ("Gringotts", "Diagon Alley, London"),
  ("Nakatomi Trading", "2121 Avenue of the Stars, Los Angeles"),
  ("Massive Dynamic", "1 Massive Plaza, New York"),
];

const PEOPLE: &[&str] = &[
  "Ada Lovelace",
  "Grace Hopper",
  "Alan Turing",
  "Edsger Dijkstra",
  "Barbara Liskov",
  "Donald Knuth",
  "Margaret Hamilton",
  "Ken Thompson",
  "Frances Allen",
  "Dennis Ritchie",
  "Radia Perlman",
  "John McCarthy",
];

const DEPARTMENTS: &[&str] = &["Engineering", "Sales", "Research"];

pub fn seed() -> SeedData {
  let rows = (0..4)
    .flat_map(|_| COMPANIES.iter().enumerate())
    .map(|(index, (name, address))| company(index, name, address))
    .collect();
  SeedData::new(rows)
}

fn company(index: usize, name: &str, address: &str) -> Row {
  let domain: String = name
    .chars()
    .filter(char::is_ascii_alphanumeric)
    .collect::<String>()
    .to_lowercase();
  let departments = DEPARTMENTS
    .iter()
    .enumerate()
    .take(1 + index % DEPARTMENTS.len())
    .map(|(offset, department)| {
      let people = (0..2)
        .map(|slot| {
          let person = PEOPLE[(index * 3 + offset * 2 + slot) % PEOPLE.len()];
          entry(person, "Person", &domain, name, address, index * 10 + offset * 2 + slot)
        })
        .collect();
      entry(department, "Department", &domain, name, address, index * 10 + offset)
        .with_children(people)
    })
    .collect();

  entry(name, "Company", &domain, name, address, index).with_children(departments)
}

fn entry(
  name: &str,
  kind: &str,
  domain: &str,
  company: &str,
  address: &str,
  number: usize,
) -> Row {
  let local: String = name
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(".")
    .to_lowercase();
  Row {
    name: name.to_string(),
    kind: kind.to_string(),
    email: format!("{local}@{domain}.example"),
    phone_no: format!("555-{:04}", number % 10_000),
    company_name: company.to_string(),
    address: address.to_string(),
    ..Row::default()
  }
}
