use serde::{Deserialize, Serialize};

/// Fixed domain prompt; the assistant only ever answers as the port-area
/// geography specialist, regardless of what the conversation contains.
pub const SYSTEM_INSTRUCTION: &str = "\
Você é um assistente especialista em geografia socioeconômica e portuária, focado especificamente no complexo do Porto do Itaqui e suas comunidades vizinhas (como Vila Maranhão).
Seu objetivo é fornecer análises sobre:
1. A Poligonal do Porto: Limites, operações e gestão da EMAP.
2. Relação Porto-Comunidade: Impactos na Vila Maranhão, projetos sociais, emprego e renda.
3. Questões Ambientais: Preservação dos manguezais, monitoramento de qualidade do ar e água.
4. Logística: Importância do corredor de exportação (ferrovia e rodovia).

Ao responder, use tom profissional, educativo e focado em desenvolvimento sustentável.
";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the role-tagged conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// A grounding citation attached to the reply, when search grounding
/// produced one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Stateless wrapper around the hosted model's `generateContent` endpoint.
/// Search grounding is enabled and thinking disabled for fast, factual
/// answers about the area; upstream errors propagate uninterpreted.
pub struct AssistantClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AssistantClient {
    pub fn new(api_key: String, model: String) -> Self {
        AssistantClient {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    pub async fn send(&self, message: &str, history: &[ChatTurn]) -> anyhow::Result<AssistantReply> {
        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let body = GenerateRequest::new(message, history);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("assistant upstream returned {status}: {detail}");
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.into_reply())
    }
}

// Wire types for the generateContent request/response. Only the fields the
// dashboard needs are modelled; everything else is ignored.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(message: &str, history: &[ChatTurn]) -> Self {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::tagged(turn.role, &turn.text))
            .collect();
        contents.push(Content::tagged(ChatRole::User, message));

        GenerateRequest {
            system_instruction: Content::untagged(SYSTEM_INSTRUCTION),
            contents,
            tools: vec![Tool {
                google_search: serde_json::Map::new(),
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<ChatRole>,
    parts: Vec<Part>,
}

impl Content {
    fn tagged(role: ChatRole, text: &str) -> Self {
        Content {
            role: Some(role),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn untagged(text: &str) -> Self {
        Content {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    // non-text parts (function calls etc.) come back with no text at all
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn into_reply(self) -> AssistantReply {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return AssistantReply {
                text: String::new(),
                citations: Vec::new(),
            };
        };
        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| Citation {
                        title: web.title,
                        uri: web.uri,
                    })
                    .collect()
            })
            .unwrap_or_default();
        AssistantReply { text, citations }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    title: Option<String>,
    uri: Option<String>,
}
