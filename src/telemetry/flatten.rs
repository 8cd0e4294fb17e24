use serde_json::{Map, Value};

use crate::host::configuration::lookup;

/// Settings whose values may be reported verbatim. Nothing here can carry
/// user content such as paths, names or free text.
pub const CONFIGURATION_VALUE_ALLOWLIST: &[&str] = &[
    "window.zoomLevel",
    "editor.fontSize",
    "editor.fontFamily",
    "editor.tabSize",
    "files.autoSave",
    "files.hotExit",
    "typescript.check.tscVersion",
    "editor.renderWhitespace",
    "editor.cursorBlinking",
    "editor.cursorStyle",
    "files.associations",
    "workbench.statusBar.visible",
    "editor.wrappingColumn",
    "editor.insertSpaces",
    "editor.renderIndentGuides",
    "files.trimTrailingWhitespace",
    "git.confirmSync",
    "editor.rulers",
    "workbench.sideBar.location",
    "editor.fontLigatures",
    "editor.wordWrap",
    "editor.lineHeight",
    "editor.detectIndentation",
    "editor.formatOnType",
    "editor.formatOnSave",
    "window.openFilesInNewWindow",
    "javascript.validate.enable",
    "editor.mouseWheelZoom",
    "typescript.check.workspaceVersion",
    "editor.fontWeight",
    "editor.scrollBeyondLastLine",
    "editor.lineNumbers",
    "editor.wrappingIndent",
    "editor.renderControlCharacters",
    "editor.autoClosingBrackets",
    "window.reopenFolders",
    "extensions.autoUpdate",
    "editor.tabCompletion",
    "files.eol",
    "explorer.openEditors.visible",
    "workbench.editor.enablePreview",
    "files.autoSaveDelay",
    "editor.roundedSelection",
    "editor.quickSuggestions",
    "editor.acceptSuggestionOnEnter",
    "workbench.editor.showTabs",
    "files.encoding",
    "editor.quickSuggestionsDelay",
    "editor.snippetSuggestions",
    "editor.selectionHighlight",
    "editor.glyphMargin",
    "php.validate.run",
    "editor.wordSeparators",
    "editor.mouseWheelScrollSensitivity",
    "editor.suggestOnTriggerCharacters",
    "git.enabled",
    "http.proxyStrictSSL",
    "terminal.integrated.fontFamily",
    "editor.overviewRulerLanes",
    "editor.wordBasedSuggestions",
    "editor.hideCursorInOverviewRuler",
    "editor.trimAutoWhitespace",
    "editor.folding",
    "workbench.editor.enablePreviewFromQuickOpen",
    "php.validate.enable",
    "editor.parameterHints",
];

/// Dotted paths of every leaf in `value`. Arrays and scalars are leaves;
/// empty objects contribute nothing. A root that is not an object has no keys.
pub fn flatten_keys(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    if value.is_object() {
        collect_keys(&mut keys, String::new(), value);
    }
    keys
}

fn collect_keys(keys: &mut Vec<String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_keys(keys, path, child);
            }
        }
        _ => keys.push(prefix),
    }
}

/// One `{path: value}` record per allowlisted path present in `value`, in
/// allowlist order. Paths that do not resolve are left out.
pub fn flatten_values<S: AsRef<str>>(value: &Value, allowlist: &[S]) -> Vec<Map<String, Value>> {
    if value.is_null() {
        return Vec::new();
    }
    allowlist
        .iter()
        .filter_map(|path| {
            let path = path.as_ref();
            lookup(value, path).map(|found| {
                let mut entry = Map::new();
                entry.insert(path.to_string(), found.clone());
                entry
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_are_leaves() {
        let v = json!({"editor": {"rulers": [80, 120], "minimap": {}}, "x": null});
        assert_eq!(flatten_keys(&v), vec!["editor.rulers", "x"]);
    }

    #[test]
    fn non_object_root_has_no_keys() {
        for root in [json!(null), json!(3), json!("on"), json!(true), json!([1, 2])] {
            assert!(flatten_keys(&root).is_empty(), "root {}", root);
        }
    }

    #[test]
    fn explicit_null_is_reported() {
        let v = json!({"files": {"eol": null}});
        assert_eq!(flatten_values(&v, &["files.eol", "files.encoding"]).len(), 1);
    }
}
