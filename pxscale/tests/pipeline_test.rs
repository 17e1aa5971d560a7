//! End-to-end properties of the rewrite pipeline.

#![allow(clippy::unwrap_used)]

use pxscale::rewrite::{rewrite_source, Pass, Rewriter, ScaleOptions};

const AD: &str = r#"import React from "react";
import { AbsoluteFill, interpolate, useCurrentFrame, useVideoConfig } from "remotion";
import { GOLD, RadialGlow, SceneTitle } from "./shared";

const SceneIntro: React.FC = () => {
  const frame = useCurrentFrame();
  const rise = interpolate(frame, [0, 1], [-30, 0]);
  return (
    <AbsoluteFill style={{ padding: "120px 50px 60px", gap: 24 }}>
      <RadialGlow color={GOLD} size={900} />
      <SceneTitle style={{ fontSize: 64, marginBottom: 20, borderRadius: 12 }} />
      <div style={{ margin: "0 0 10px", width: 200, height: 6, left: 40 }} />
    </AbsoluteFill>
  );
};

const SceneOutro = () => {
  const { fps } = useVideoConfig();
  const frame = useCurrentFrame();
  return <div style={{ top: 8, right: 11, fontSize: 10, gap: 5 }} />;
};

export const Ad1_Intro_V5: React.FC = () => (
  <AbsoluteFill>
    <SceneIntro />
    <SceneOutro />
  </AbsoluteFill>
);
"#;

fn rewrite(src: &str) -> String {
    rewrite_source(src).unwrap().text
}

#[test]
fn test_full_ad_rewrite() {
    let out = rewrite(AD);
    assert!(out.contains(r#"import { GOLD, RadialGlow, SceneTitle, useScale } from "./shared";"#));
    assert!(out.contains("  const frame = useCurrentFrame();\n  const s = useScale();\n  const rise"));
    assert!(out.contains("  const { fps } = useVideoConfig();\n  const s = useScale();\n  const frame"));
    assert_eq!(out.matches("const s = useScale();").count(), 2);
    assert!(out.contains("padding: `${s(120)}px ${s(50)}px ${s(60)}px`"));
    assert!(out.contains("gap: s(24)"));
    assert!(out.contains("size={s(900)}"));
    assert!(out.contains("fontSize: s(64), marginBottom: s(20), borderRadius: s(12)"));
    assert!(out.contains("margin: `0 0 ${s(10)}px`, width: s(200), height: 6, left: s(40)"));
    assert!(out.contains("top: 8, right: s(11), fontSize: 10, gap: s(5)"));
    assert!(out.contains("[s(-30), 0]"));
    // Remotion's own import is never touched.
    assert!(out.contains(
        r#"import { AbsoluteFill, interpolate, useCurrentFrame, useVideoConfig } from "remotion";"#
    ));
}

#[test]
fn test_idempotence() {
    let once = rewrite(AD);
    let twice = rewrite_source(&once).unwrap();
    assert!(!twice.changed);
    assert_eq!(twice.text, once);
}

#[test]
fn test_threshold_boundaries() {
    let cases = [
        ("fontSize", 10),
        ("top", 10),
        ("bottom", 10),
        ("left", 10),
        ("right", 10),
        ("gap", 4),
        ("marginTop", 4),
        ("marginBottom", 4),
        ("borderRadius", 4),
    ];
    for (prop, threshold) in cases {
        let at = format!("{{ {prop}: {threshold} }}");
        assert_eq!(rewrite(&at), at, "{prop} at threshold must stay bare");

        let above = format!("{{ {prop}: {} }}", threshold + 1);
        assert_eq!(
            rewrite(&above),
            format!("{{ {prop}: s({}) }}", threshold + 1),
            "{prop} above threshold must be wrapped"
        );
    }
}

#[test]
fn test_configured_threshold() {
    let mut options = ScaleOptions::default();
    options.thresholds.font_size = 20;
    let rewriter = Rewriter::new(&options).unwrap();
    assert_eq!(rewriter.rewrite("{ fontSize: 20 }").text, "{ fontSize: 20 }");
    assert_eq!(rewriter.rewrite("{ fontSize: 21 }").text, "{ fontSize: s(21) }");
}

#[test]
fn test_import_idempotence() {
    let src = "import { GOLD } from \"./shared\";\n// useScale is provided elsewhere\n";
    let result = rewrite_source(src).unwrap();
    assert_eq!(result.edits_for(Pass::Import), 0);
    assert_eq!(result.text, src);
}

#[test]
fn test_import_trailing_comma_styles() {
    let trailing = "import {\n  GOLD,\n  RadialGlow,\n} from './shared';\n";
    assert_eq!(
        rewrite(trailing),
        "import {\n  GOLD,\n  RadialGlow,\n  useScale,\n} from './shared';\n"
    );
    let bare = "import {\n  GOLD,\n  RadialGlow\n} from './shared';\n";
    assert_eq!(
        rewrite(bare),
        "import {\n  GOLD,\n  RadialGlow,\n  useScale,\n} from './shared';\n"
    );
}

#[test]
fn test_missing_import_is_a_no_op() {
    let src = "import { GOLD } from \"../theme\";\nconst a = { gap: 2 };\n";
    assert_eq!(rewrite(src), src);
}

#[test]
fn test_compound_padding() {
    assert_eq!(
        rewrite(r#"{ padding: "120px 50px 60px" }"#),
        "{ padding: `${s(120)}px ${s(50)}px ${s(60)}px` }"
    );
}

#[test]
fn test_mixed_margin() {
    assert_eq!(
        rewrite(r#"{ margin: "0 0 10px" }"#),
        "{ margin: `0 0 ${s(10)}px` }"
    );
}

#[test]
fn test_shorthand_with_bare_zero_keeps_every_value() {
    assert_eq!(
        rewrite(r#"{ margin: "16px 50px 0" }"#),
        "{ margin: `${s(16)}px ${s(50)}px 0` }"
    );
    assert_eq!(
        rewrite(r#"{ padding: "0 10px 20px" }"#),
        r#"{ padding: "0 10px 20px" }"#
    );
}

#[test]
fn test_width_height_band() {
    assert_eq!(rewrite("{ width: 5 }"), "{ width: 5 }");
    assert_eq!(rewrite("{ width: 600 }"), "{ width: 600 }");
    assert_eq!(rewrite("{ width: 200 }"), "{ width: s(200) }");
    assert_eq!(rewrite("{ height: 499, width: 10 }"), "{ height: s(499), width: 10 }");
}

#[test]
fn test_interpolation_wrapping() {
    assert_eq!(
        rewrite("interpolate(frame, [0, 1], [-30, 0])"),
        "interpolate(frame, [0, 1], [s(-30), 0])"
    );
    let small = "interpolate(frame, [0,1],[5,0])";
    assert_eq!(rewrite(small), small);
}

#[test]
fn test_double_wrap_collapse() {
    assert_eq!(rewrite("{ fontSize: s(s(42)) }"), "{ fontSize: s(42) }");
}

#[test]
fn test_scaled_expressions_are_left_alone() {
    let src = "{ fontSize: 40 * scale, gap: 8*k, borderRadius: 50%, width: 100.5 }";
    let result = rewrite_source(src).unwrap();
    assert!(!result.changed, "got {}", result.text);
}

#[test]
fn test_property_names_respect_identifier_boundaries() {
    let src = "{ paddingRight: 40, insetTop: 30, xgap: 9 }";
    assert_eq!(rewrite(src), src);
}

#[test]
fn test_custom_helper_name() {
    let options = ScaleOptions {
        helper: "px".to_owned(),
        ..ScaleOptions::default()
    };
    let rewriter = Rewriter::new(&options).unwrap();
    let out = rewriter
        .rewrite("const SceneA = () => {\n  const frame = useCurrentFrame();\n  return { fontSize: 30 };\n};\n")
        .text;
    assert!(out.contains("const px = useScale();"));
    assert!(out.contains("fontSize: px(30)"));
    assert_eq!(rewriter.rewrite(&out).text, out);
}
