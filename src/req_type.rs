use crate::Component;

/// What a partial reload asked for.
#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct PartialComponent {
    pub component: Component,
    pub only: Vec<String>,
    pub except: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) enum InertiaRequestType {
    Standard,
    Partial(PartialComponent),
}

impl InertiaRequestType {
    /// Classifies a visit to `rendered`. A partial header set aimed at another component
    /// (e.g. the user navigated away meanwhile) is ignored and the visit is standard.
    pub fn for_component(partial: Option<PartialComponent>, rendered: &Component) -> Self {
        match partial {
            Some(partial) if &partial.component == rendered => InertiaRequestType::Partial(partial),
            _ => InertiaRequestType::Standard,
        }
    }

    #[inline]
    pub fn partials(&self) -> Option<&PartialComponent> {
        match self {
            InertiaRequestType::Partial(reqs) => Some(reqs),
            InertiaRequestType::Standard => None,
        }
    }
}

/// Splits a comma-separated partial header into its (trimmed, non-empty) keys.
pub(crate) fn parse_partial_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn partial(component: &str, only: &[&str]) -> PartialComponent {
        PartialComponent {
            component: Component(component.into()),
            only: only.iter().map(|key| key.to_string()).collect(),
            except: Vec::new(),
        }
    }

    #[test]
    fn partial_reloads_only_apply_to_their_component() {
        let req_type =
            InertiaRequestType::for_component(Some(partial("Index", &["a"])), &"Index".into());
        assert_eq!(req_type.partials(), Some(&partial("Index", &["a"])));

        let req_type =
            InertiaRequestType::for_component(Some(partial("Users", &["a"])), &"Index".into());
        assert_eq!(req_type, InertiaRequestType::Standard);

        assert_eq!(
            InertiaRequestType::for_component(None, &"Index".into()),
            InertiaRequestType::Standard
        );
    }

    #[test]
    fn partial_keys_are_trimmed() {
        assert_eq!(
            parse_partial_keys("events, popularUsers ,,"),
            vec!["events".to_string(), "popularUsers".to_string()]
        );
        assert!(parse_partial_keys("").is_empty());
    }
}
