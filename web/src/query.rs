//! Redirect query strings

use reqkit_shared::ParamSource;

use crate::view::string_params;

/// Join the string-valued entries of `params` as `key=value&...`
///
/// Pairs keep the source's enumeration order and are not escaped. A missing
/// source gives an empty string.
pub fn redirect_message(params: Option<&dyn ParamSource>) -> String {
    let Some(source) = params else {
        return String::new();
    };

    string_params(source)
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqkit_shared::{Attributes, Bean};
    use serde::Serialize;
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, HashSet};

    #[derive(Serialize)]
    struct Form {
        a: String,
        b: String,
        c: u32,
    }

    #[test]
    fn test_bean_query() {
        let bean = Bean(Form { a: "x".into(), b: "y".into(), c: 5 });
        let q = redirect_message(Some(&bean));
        let pairs: HashSet<&str> = q.split('&').collect();
        assert_eq!(pairs, HashSet::from(["a=x", "b=y"]));
    }

    #[test]
    fn test_source_order_kept() {
        let attrs = Attributes::new().with("z", "1").with("n", 2).with("a", "3");
        assert_eq!(redirect_message(Some(&attrs)), "z=1&a=3");
    }

    #[test]
    fn test_map_query() {
        let mut m: BTreeMap<String, Value> = BTreeMap::new();
        m.insert("page".into(), json!("2"));
        m.insert("size".into(), json!(20));
        m.insert("sort".into(), json!("name"));
        assert_eq!(redirect_message(Some(&m)), "page=2&sort=name");
    }

    #[test]
    fn test_values_not_escaped() {
        let attrs = Attributes::new().with("msg", "a b&c");
        assert_eq!(redirect_message(Some(&attrs)), "msg=a b&c");
    }

    #[test]
    fn test_missing_source() {
        assert_eq!(redirect_message(None), "");
    }
}
