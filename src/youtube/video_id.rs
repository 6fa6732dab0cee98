use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // watch?v=, youtu.be/ and embed/ forms; the ID runs until &, newline, ? or #
    static ref URL_FORMS: Regex =
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)").unwrap();
    static ref BARE_ID: Regex = Regex::new(r"^([a-zA-Z0-9_-]{11})$").unwrap();
}

/// Extract a video ID from a watch/share/embed URL or a bare 11-character ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    [&*URL_FORMS, &*BARE_ID]
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_accepted_shapes_yield_same_id() {
        let inputs = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ#comments",
            "dQw4w9WgXcQ",
            "  dQw4w9WgXcQ \n",
        ];
        for input in inputs {
            assert_eq!(
                extract_video_id(input).as_deref(),
                Some("dQw4w9WgXcQ"),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_rejects_unrecognised_input() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_video_id("dQw4w9WgXc"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/channel/UCxyz"), None);
    }
}
