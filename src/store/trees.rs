pub const PROFILES: &str = "mastery_profiles";
