use log::warn;

/// 將位置參數展開為幻燈片編號
///
/// `"7"` 展開為 `[7]`，`"3-5"` 展開為 `[3, 4, 5]`，反向範圍（`"5-3"`）為空。
/// 無法辨識的參數與編號 0 記錄警告後略過。
#[must_use]
pub fn expand_slide_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<u32> {
    let mut slides = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        let parts: Vec<&str> = token.split('-').collect();
        match parts.as_slice() {
            [single] => {
                if let Some(slide) = parse_number(single) {
                    slides.push(slide);
                }
            }
            [start, end] => {
                let (Some(start), Some(end)) = (parse_number(start), parse_number(end)) else {
                    continue;
                };
                slides.extend(start..=end);
            }
            _ => warn!("{token} 不是數字或範圍，已略過"),
        }
    }

    slides
}

fn parse_number(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) => {
            warn!("幻燈片編號必須為正整數，已略過 {raw}");
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{raw} 不是數字: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_number() {
        assert_eq!(expand_slide_tokens(&["7"]), vec![7]);
    }

    #[test]
    fn test_inclusive_range() {
        assert_eq!(expand_slide_tokens(&["3-5"]), vec![3, 4, 5]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(expand_slide_tokens(&["5-3"]).is_empty());
    }

    #[test]
    fn test_order_is_preserved_as_written() {
        assert_eq!(expand_slide_tokens(&["10-11", "15", "2"]), vec![10, 11, 15, 2]);
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        let tokens = ["abc", "1-2-3", "4-x", "-2", "8"];
        assert_eq!(expand_slide_tokens(&tokens), vec![8]);
    }

    #[test]
    fn test_zero_is_not_a_slide() {
        assert_eq!(expand_slide_tokens(&["0", "0-2", "3"]), vec![3]);
    }
}
