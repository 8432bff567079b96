// Session context passed explicitly to data access

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserType {
    #[default]
    Farmer,
    Company,
}

impl UserType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "farmer" => Some(UserType::Farmer),
            "company" => Some(UserType::Company),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Farmer => "farmer",
            UserType::Company => "company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_type: UserType,
}

impl Session {
    pub fn new(token: String, user_type: UserType) -> Self {
        Self { token, user_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_type() {
        assert_eq!(UserType::parse("Company"), Some(UserType::Company));
        assert_eq!(UserType::parse(" farmer "), Some(UserType::Farmer));
        assert_eq!(UserType::parse("admin"), None);
    }
}
