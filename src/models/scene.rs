use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SceneRole {
    Screenwriter,
    CharacterAnalyst,
    NarrativeStructureExpert,
    Playwright,
    Cinematographer,
}

impl SceneRole {
    pub fn display_name(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Screenwriter, Language::En) => "Screenwriter",
            (Self::CharacterAnalyst, Language::En) => "Character Analyst",
            (Self::NarrativeStructureExpert, Language::En) => "Narrative Structure Expert",
            (Self::Playwright, Language::En) => "Playwright",
            (Self::Cinematographer, Language::En) => "Cinematographer",
            (Self::Screenwriter, Language::Ko) => "시나리오 작가",
            (Self::CharacterAnalyst, Language::Ko) => "인물 분석가",
            (Self::NarrativeStructureExpert, Language::Ko) => "서사 구조 전문가",
            (Self::Playwright, Language::Ko) => "극작가",
            (Self::Cinematographer, Language::Ko) => "카메라 워크 감독",
        }
    }

    /// System instruction sent to the completion API for this role.
    pub fn instruction(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Screenwriter, Language::En) => {
                "You are an experienced screenwriter. Structure the given scene concept into clear \
                 beats, character emotional arcs, and a dramatic script. Include Dialogue, Blocking, \
                 and Emotion annotations, and summarize the scene's intention and core conflict in \
                 one sentence."
            }
            (Self::CharacterAnalyst, Language::En) => {
                "You are a character analysis expert. Analyze the characters' motivations, \
                 backstories, and psychological conflicts; provide likely reactions and sample lines."
            }
            (Self::NarrativeStructureExpert, Language::En) => {
                "You are an expert in narrative structure. Place the scene within a larger story, \
                 explain its narrative function, and suggest surrounding scene ideas and pacing."
            }
            (Self::Playwright, Language::En) => {
                "You are a playwright. Rewrite the scene for the stage including dialogue, \
                 blocking, props, sound cues, and acting notes."
            }
            (Self::Cinematographer, Language::En) => {
                "You are a cinematographer. Reinterpret the scene visually: shot list, camera \
                 moves, edit ideas, lighting, and visual focus."
            }
            (Self::Screenwriter, Language::Ko) => {
                "당신은 경험 많은 시나리오 작가입니다. 주어진 장면의 콘셉트, 등장인물 감정선, \
                 비트를 구조화하여 드라마틱한 장면 대본을 만들어 주세요. 대화, 행동, 감정 표기를 \
                 명확히 하고 장면의 의도와 핵심 갈등을 한 문장으로 요약해 주세요."
            }
            (Self::CharacterAnalyst, Language::Ko) => {
                "당신은 캐릭터 분석 전문가입니다. 등장인물들의 동기, 과거사, 심리적 갈등을 \
                 분석하고 자연스러운 반응을 문장과 대사 예시로 작성하세요."
            }
            (Self::NarrativeStructureExpert, Language::Ko) => {
                "당신은 서사 구조 전문가입니다. 장면을 이야기 구조 어디에 배치할지, 장면의 기능을 \
                 설명하고 강화 아이디어를 제안하세요."
            }
            (Self::Playwright, Language::Ko) => {
                "당신은 극작가입니다. 무대 연출 관점으로 대사, 동선, 소품, 음향 큐, 배우 지시를 쓰세요."
            }
            (Self::Cinematographer, Language::Ko) => {
                "당신은 촬영감독입니다. 샷리스트, 무빙, 컷 편집 아이디어, 조명 톤을 제시하고 \
                 시각적 포커스를 설명하세요."
            }
        }
    }
}

fn default_tone() -> String {
    "Poetic".into()
}

fn default_length() -> String {
    "Medium (10-30 lines)".into()
}

fn default_true() -> bool {
    true
}

/// POST /api/scenes
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SceneRequest {
    #[serde(default)]
    pub language: Language,

    pub role: SceneRole,

    #[validate(length(min = 1, max = 2000, message = "Prompt must be 1-2000 characters"))]
    pub prompt: String,

    /// Comma separated names
    #[serde(default)]
    #[validate(length(max = 500, message = "Characters must be under 500 characters"))]
    pub characters: String,

    #[serde(default = "default_tone")]
    #[validate(length(max = 100))]
    pub tone: String,

    #[serde(default = "default_length")]
    #[validate(length(max = 100))]
    pub length: String,

    /// Try the completion API before the local template
    #[serde(default)]
    pub use_ai: bool,

    /// When false, a failed API call is reported instead of replaced
    #[serde(default = "default_true")]
    pub allow_fallback: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SceneSource {
    Claude,
    Local,
}

#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub content: String,
    pub source: SceneSource,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}
