use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttackError {
    #[error("attack '{kind}' not found.\nAvailable attacks: {}", .available.join(", "))]
    UnknownAttack {
        kind: String,
        available: Vec<String>,
    },
    // The kind is registered, but under a type that does not follow the
    // snake_case -> PascalCase naming rule.
    #[error("attack type '{type_name}' not found for '{kind}'.\nAvailable attacks: {}", .available.join(", "))]
    MissingAttackClass {
        kind: String,
        type_name: String,
        available: Vec<String>,
    },
}

impl AttackError {
    pub fn available(&self) -> &[String] {
        match self {
            AttackError::UnknownAttack { available, .. } => available,
            AttackError::MissingAttackClass { available, .. } => available,
        }
    }
}
