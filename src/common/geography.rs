/// Postal code and display name for every jurisdiction a plan can be scored in.
/// `XX` is the placeholder state used by test uploads.
pub(crate) const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"), ("AK", "Alaska"), ("AZ", "Arizona"), ("AR", "Arkansas"),
    ("CA", "California"), ("CO", "Colorado"), ("CT", "Connecticut"), ("DE", "Delaware"),
    ("FL", "Florida"), ("GA", "Georgia"), ("HI", "Hawaii"), ("ID", "Idaho"),
    ("IL", "Illinois"), ("IN", "Indiana"), ("IA", "Iowa"), ("KS", "Kansas"),
    ("KY", "Kentucky"), ("LA", "Louisiana"), ("ME", "Maine"), ("MD", "Maryland"),
    ("MA", "Massachusetts"), ("MI", "Michigan"), ("MN", "Minnesota"), ("MS", "Mississippi"),
    ("MO", "Missouri"), ("MT", "Montana"), ("NE", "Nebraska"), ("NV", "Nevada"),
    ("NH", "New Hampshire"), ("NJ", "New Jersey"), ("NM", "New Mexico"), ("NY", "New York"),
    ("NC", "North Carolina"), ("ND", "North Dakota"), ("OH", "Ohio"), ("OK", "Oklahoma"),
    ("OR", "Oregon"), ("PA", "Pennsylvania"), ("RI", "Rhode Island"), ("SC", "South Carolina"),
    ("SD", "South Dakota"), ("TN", "Tennessee"), ("TX", "Texas"), ("UT", "Utah"),
    ("VT", "Vermont"), ("VA", "Virginia"), ("WA", "Washington"), ("WV", "West Virginia"),
    ("WI", "Wisconsin"), ("WY", "Wyoming"),
];

/// Jurisdictions that can appear on uploaded plans but not on the historical maps.
const OTHER_JURISDICTIONS: &[(&str, &str)] = &[
    ("DC", "District of Columbia"), ("PR", "Puerto Rico"), ("VI", "Virgin Islands"),
    ("XX", "Null Island"),
];

/// Map a postal code (case-insensitive) to its display name.
pub fn state_code_to_name(code: &str) -> Option<&'static str> {
    let code = code.to_ascii_uppercase();
    STATES.iter().chain(OTHER_JURISDICTIONS)
        .find(|(abbr, _)| *abbr == code)
        .map(|&(_, name)| name)
}

/// Map a display name to its postal code.
pub fn state_name_to_code(name: &str) -> Option<&'static str> {
    STATES.iter().chain(OTHER_JURISDICTIONS)
        .find(|(_, full)| full.eq_ignore_ascii_case(name))
        .map(|&(abbr, _)| abbr)
}
