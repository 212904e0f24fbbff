const FUNCTION_SEGMENT: &str = ":function:";

/// Extracts the bare function name from a name, a partial ARN, or a full ARN,
/// dropping any version or alias qualifier.
pub fn function_name_from_identifier(identifier: &str) -> &str {
    let identifier = identifier.trim();
    let unqualified = match identifier.find(FUNCTION_SEGMENT) {
        Some(index) => &identifier[index + FUNCTION_SEGMENT.len()..],
        None => identifier,
    };
    unqualified
        .split_once(':')
        .map_or(unqualified, |(name, _qualifier)| name)
}

pub fn function_name_matches(query: &str, returned_name: &str) -> bool {
    !returned_name.is_empty() && function_name_from_identifier(query) == returned_name
}
