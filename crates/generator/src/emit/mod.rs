//! Renderers for the per-package source artifacts.
//!
//! Each renderer turns part of the in-memory tree into source text,
//! deterministically: identical input renders byte-identical output.
//! Renderers returning `Option<String>` use `None` for "omit this
//! artifact" (a package with no constants has no constants file).

pub mod client;
pub mod constants;
pub mod models;
pub mod resource_id;

/// The documented meaning of an expected status code for a given operation
/// shape. Codes without a documented meaning are flagged rather than
/// rejected.
pub(crate) fn status_code_comment(code: u16, method: &str, long_running: bool) -> &'static str {
    if method.eq_ignore_ascii_case("delete") {
        if long_running {
            return match code {
                200 => "deletion started",
                202 => "deletion accepted",
                _ => "undocumented",
            };
        }
        return match code {
            200 => "deleted",
            204 => "deleted / gone",
            _ => "undocumented",
        };
    }

    if method.eq_ignore_ascii_case("get") {
        return match code {
            200 => "ok",
            _ => "undocumented",
        };
    }

    "undocumented"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_codes_depend_on_long_running() {
        assert_eq!(status_code_comment(200, "DELETE", false), "deleted");
        assert_eq!(status_code_comment(200, "DELETE", true), "deletion started");
        assert_eq!(
            status_code_comment(202, "DELETE", true),
            "deletion accepted"
        );
        assert_eq!(status_code_comment(204, "DELETE", false), "deleted / gone");
    }

    #[test]
    fn unknown_codes_are_flagged_not_rejected() {
        assert_eq!(status_code_comment(418, "GET", false), "undocumented");
        assert_eq!(status_code_comment(201, "PUT", true), "undocumented");
    }
}
