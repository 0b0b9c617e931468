use serde_json::json;

use super::queries::*;
use super::{
    delete_request, entity_mutation, get_request, insert_str, list_request, unsupported, Operation,
    OperationRequest, Params, ResourceKind,
};
use crate::client::Variables;
use crate::error::TwingateResult;
use crate::twingate_error;

const KIND: ResourceKind = ResourceKind::User;

pub const ROLES: [&str; 6] = ["ADMIN", "DEVOPS", "NETWORK_ADMIN", "READONLY", "SUPPORT", "MEMBER"];
pub const STATES: [&str; 2] = ["ACTIVE", "DISABLED"];

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Get => get_request(GET_USER, "user", KIND, params),
        Operation::GetAll => list_request(GET_USERS, "users", params),
        Operation::Update => {
            let fields = params.collection("updateFields")?;
            let mut variables = Variables::new();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            insert_str(&mut variables, &fields, "firstName")?;
            insert_str(&mut variables, &fields, "lastName")?;
            insert_choice(&mut variables, &fields, "role", &ROLES)?;
            insert_choice(&mut variables, &fields, "state", &STATES)?;
            Ok(entity_mutation(UPDATE_USER, "userUpdate", variables))
        }
        Operation::Delete => delete_request(DELETE_USER, "userDelete", KIND.id_param(), params),
        other => Err(unsupported(KIND, other)),
    }
}

fn insert_choice(
    variables: &mut Variables,
    fields: &Params,
    name: &str,
    allowed: &[&str],
) -> TwingateResult<()> {
    if let Some(value) = fields.optional_str(name)? {
        let value = value.to_ascii_uppercase();
        if !allowed.contains(&value.as_str()) {
            return Err(twingate_error!(
                InvalidInput,
                "{} must be one of {}",
                name,
                allowed.join(", ")
            ));
        }
        variables.insert(name.to_string(), json!(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_role_and_state() {
        let params = Params::new()
            .with("userId", "u_1")
            .with("updateFields", json!({ "firstName": "Ada", "role": "admin", "state": "DISABLED" }));
        let request = build(Operation::Update, &params).unwrap();
        assert_eq!(
            json!(request.variables),
            json!({ "id": "u_1", "firstName": "Ada", "role": "ADMIN", "state": "DISABLED" })
        );
    }

    #[test]
    fn update_rejects_unknown_role() {
        let params = Params::new()
            .with("userId", "u_1")
            .with("updateFields", json!({ "role": "OWNER" }));
        assert!(build(Operation::Update, &params).is_err());
    }

    #[test]
    fn users_cannot_be_created() {
        let params = Params::new().with("name", "x");
        assert!(build(Operation::Create, &params).is_err());
    }
}
