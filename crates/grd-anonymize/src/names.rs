//! Name pools and sex classification.

/// Male forenames.
pub const MALE_NAMES: &[&str] = &[
    "Alejandro", "Andrés", "Antonio", "Carlos", "Cristian", "Daniel", "Diego", "Eduardo",
    "Fernando", "Francisco", "Gabriel", "Gonzalo", "Héctor", "Ignacio", "Javier", "Jorge",
    "José", "Juan", "Luis", "Manuel", "Marcelo", "Miguel", "Nicolás", "Pablo", "Patricio",
    "Pedro", "Rafael", "Ricardo", "Roberto", "Rodrigo", "Sebastián", "Sergio", "Tomás",
    "Víctor", "Álvaro", "Cristóbal", "Felipe", "Matías", "Mauricio", "Ramiro", "Santiago",
];

/// Female forenames.
pub const FEMALE_NAMES: &[&str] = &[
    "Alejandra", "Ana", "Andrea", "Antonia", "Camila", "Carolina", "Catalina", "Claudia",
    "Cristina", "Daniela", "Elena", "Fernanda", "Francisca", "Gabriela", "Isabel", "Javiera",
    "Jessica", "Katherine", "Laura", "Lorena", "Macarena", "María", "María José", "Natalia",
    "Paola", "Patricia", "Paulina", "Pilar", "Rocío", "Sofía", "Valentina", "Verónica",
    "Viviana", "Ángela", "Constanza", "Diana", "Fabiola", "Gloria", "Mónica",
];

/// Surnames shared by both pools.
pub const SURNAMES: &[&str] = &[
    "González", "Muñoz", "Rojas", "Díaz", "Pérez", "Soto", "Contreras", "Silva", "Martínez",
    "Sepúlveda", "Morales", "Rodríguez", "López", "Fuentes", "Hernández", "Torres", "Araya",
    "Flores", "Espinoza", "Valenzuela", "Castillo", "Ramírez", "Reyes", "Gutiérrez", "Castro",
    "Vargas", "Álvarez", "Vásquez", "Tapia", "Fernández", "Sánchez", "Peña", "Cáceres",
    "Jiménez", "Araos", "Ruiz", "Navarro", "Moreno", "Rivera", "Figueroa", "Riquelme",
    "Miranda", "Vega", "Campos", "Sandoval", "Carrasco", "Herrera", "Núñez", "Medina",
];

/// Sex used to pick a forename pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Classifies a dataset sex label. `hombre`, `masculino` and `m` are male
    /// (trimmed, any case); every other label is female.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "hombre" | "masculino" | "m" => Self::Male,
            _ => Self::Female,
        }
    }

    pub fn forenames(self) -> &'static [&'static str] {
        match self {
            Self::Male => MALE_NAMES,
            Self::Female => FEMALE_NAMES,
        }
    }
}
