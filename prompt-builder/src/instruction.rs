//! Gufeng instruction assembly.

use std::collections::HashMap;
use std::sync::LazyLock;

use prompt_primitives::TagOption;

use crate::template::{PromptTemplate, TemplateResult};

/// Tag context used when the user selected nothing.
pub const NO_EXTRA_OPTIONS: &str = "无附加选项";

const TAG_CONTEXT_PREFIX: &str = "用户已选择的附加风格/元素: ";

const GUFENG_INSTRUCTION: &str = r#"你是一位顶级的中国古风（Gufeng/Xianxia）影视视觉导演和提示词工程师。
你的任务是根据用户的简单描述，生成适用于顶级AI绘图工具（如Midjourney v6, Stable Diffusion XL）和AI视频工具（如Runway Gen-2, Pika）的专业提示词。

用户描述: "{{scene}}"
{{tag_context}}

请遵循以下原则：
1. **审美风格**: 中国古典美学，构图讲究留白或深邃，光影要有电影质感（Cinematic lighting），服饰需符合历史或仙侠设定（Hanfu, intricate embroidery）。
2. **画面提示词 (Image Prompt)**: 必须包含中英文双语。首先提供英文Prompt（Midjourney/SD格式），包含主体描述、环境细节、光影、色彩色调、镜头参数（如 85mm lens, f/1.8, bokeh）、胶片质感（Kodak Portra, film grain）以及画质词（8k, masterpiece, ultra-detailed）。然后换行提供中文翻译。
3. **视频提示词 (Video Prompt)**: 必须包含中英文双语。首先提供英文Prompt（Runway/Pika格式），专注于动态描述（如 slow motion, camera pan right, wind blowing hair, petals falling）。然后换行提供中文翻译。
4. **推荐标签 (Tags)**: 根据当前场景，联想出5-8个可以进一步优化画面的选项。例如：如果场景是悲伤的，推荐“雨天(Rainy)”、“冷色调(Cool tone)”；如果是打斗，推荐“动态模糊(Motion blur)”、“低角度(Low angle)”。

请以JSON格式返回。"#;

static GUFENG_TEMPLATE: LazyLock<PromptTemplate> = LazyLock::new(|| {
    PromptTemplate::new(GUFENG_INSTRUCTION)
        .with_required_variable("scene")
        .with_required_variable("tag_context")
});

/// Summarizes the selected tags as `category:value` pairs.
#[must_use]
pub fn tag_context(selected: &[TagOption]) -> String {
    if selected.is_empty() {
        return NO_EXTRA_OPTIONS.to_owned();
    }

    let pairs = selected
        .iter()
        .map(|tag| format!("{}:{}", tag.category(), tag.value()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{TAG_CONTEXT_PREFIX}{pairs}")
}

/// Builds the full instruction for one scene description.
///
/// The description is embedded as typed, without trimming.
///
/// # Errors
///
/// Returns a [`TemplateError`](crate::template::TemplateError) only if the
/// built-in template loses one of its variables.
pub fn build_instruction(scene: &str, selected: &[TagOption]) -> TemplateResult<String> {
    let context = tag_context(selected);
    let vars = HashMap::from([("scene", scene), ("tag_context", context.as_str())]);
    GUFENG_TEMPLATE.render(&vars)
}

#[cfg(test)]
mod tests {
    use prompt_primitives::TagId;

    use super::*;

    fn tag(id: &str, value: &str, category: &str) -> TagOption {
        TagOption::new(TagId::new(id).unwrap(), id, value, category)
    }

    #[test]
    fn empty_selection_uses_marker() {
        assert_eq!(tag_context(&[]), "无附加选项");
    }

    #[test]
    fn selection_lists_category_value_pairs() {
        let tags = [
            tag("a", "rim lighting", "光影"),
            tag("b", "low angle", "镜头"),
        ];
        assert_eq!(
            tag_context(&tags),
            "用户已选择的附加风格/元素: 光影:rim lighting, 镜头:low angle"
        );
    }

    #[test]
    fn instruction_embeds_scene_context_and_rubric() {
        let scene = "一位身穿红衣的女侠客，站在竹林中";
        let instruction = build_instruction(scene, &[tag("a", "rainy", "天气")]).unwrap();

        assert!(instruction.contains("用户描述: \"一位身穿红衣的女侠客，站在竹林中\""));
        assert!(instruction.contains("天气:rainy"));
        assert!(instruction.contains("5-8个"));
        assert!(instruction.contains("中英文双语"));
        assert!(instruction.ends_with("请以JSON格式返回。"));
        assert!(!instruction.contains("{{"));
    }

    #[test]
    fn placeholder_text_in_scene_is_kept_verbatim() {
        let instruction = build_instruction("{{tag_context}}", &[]).unwrap();
        assert!(instruction.contains("用户描述: \"{{tag_context}}\""));
    }
}
