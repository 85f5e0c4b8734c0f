use serde_json::{json, Value};

pub const POLICY_VERSION: &str = "2012-10-17";
pub const BEDROCK_SERVICE_PRINCIPAL: &str = "bedrock.amazonaws.com";

pub const KNOWLEDGE_BASE_ACTIONS: [&str; 6] = [
    "bedrock:*",
    "aoss:*",
    "s3:GetObject",
    "s3:ListBucket",
    "s3:PutObject",
    "s3:DeleteObject",
];

/// Trust policy letting Bedrock assume the knowledge base role.
pub fn assume_role_policy() -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [
            {
                "Effect": "Allow",
                "Principal": {
                    "Service": BEDROCK_SERVICE_PRINCIPAL
                },
                "Action": "sts:AssumeRole"
            }
        ]
    })
}

pub fn inline_policy() -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [
            {
                "Effect": "Allow",
                "Action": KNOWLEDGE_BASE_ACTIONS,
                "Resource": "*"
            }
        ]
    })
}
