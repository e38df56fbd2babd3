//! Declarative tool descriptors exposed over MCP.

use mcp::Tool;
use serde_json::json;

/// The fixed set of tools this server exposes.
///
/// Pure data: the same four descriptors on every call. The dispatcher
/// matches on the names declared here.
pub fn tool_descriptors() -> Vec<Tool> {
    vec![
        Tool {
            name: "search_x".to_string(),
            description: "Search X (Twitter) for real-time information via Grok.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query"},
                },
                "required": ["query"],
            }),
        },
        Tool {
            name: "ask_grok".to_string(),
            description: "Ask Grok a free-form question. Works for general questions and \
                          reasoning tasks, not just X search."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "question": {"type": "string", "description": "Question for Grok"},
                },
                "required": ["question"],
            }),
        },
        Tool {
            name: "generate_image".to_string(),
            description: "Generate images from a text prompt with the Grok Imagine API. \
                          Returns image URLs; nothing is written to disk."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Text prompt describing the image to generate",
                    },
                    "n": {
                        "type": "integer",
                        "description": "Number of images to generate (1-10). Default: 1",
                        "minimum": 1,
                        "maximum": 10,
                    },
                    "aspect_ratio": {
                        "type": "string",
                        "description": "Aspect ratio (1:1, 3:4, 4:3, 9:16, 16:9). Default: 1:1",
                        "enum": ["1:1", "3:4", "4:3", "9:16", "16:9"],
                    },
                },
                "required": ["prompt"],
            }),
        },
        Tool {
            name: "edit_image".to_string(),
            description: "Edit an existing image with a text prompt using the Grok Imagine \
                          API. Returns image URLs; nothing is written to disk."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Edit instruction for the image",
                    },
                    "image_path": {
                        "type": "string",
                        "description": "File path of the image to edit",
                    },
                    "image_url": {
                        "type": "string",
                        "description": "URL of the image to edit",
                    },
                    "image_base64": {
                        "type": "string",
                        "description": "Base64-encoded image data to edit",
                    },
                    "n": {
                        "type": "integer",
                        "description": "Number of edited images to generate (1-10). Default: 1",
                        "minimum": 1,
                        "maximum": 10,
                    },
                },
                "required": ["prompt"],
            }),
        },
    ]
}
