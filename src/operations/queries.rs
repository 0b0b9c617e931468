//! GraphQL documents sent to the Twingate admin API.
//!
//! List queries take `$after`/`$first` and select `pageInfo` so they can be driven by
//! [`GraphQLClient::fetch_all`](crate::client::GraphQLClient::fetch_all).

// Remote Networks
pub const GET_REMOTE_NETWORKS: &str = r#"
query GetRemoteNetworks($after: String, $first: Int) {
    remoteNetworks(after: $after, first: $first) {
        edges {
            node {
                id
                name
                isActive
                createdAt
                updatedAt
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_REMOTE_NETWORK: &str = r#"
query GetRemoteNetwork($id: ID!) {
    remoteNetwork(id: $id) {
        id
        name
        isActive
        createdAt
        updatedAt
        resources {
            edges {
                node {
                    id
                    name
                }
            }
        }
        connectors {
            edges {
                node {
                    id
                    name
                    state
                }
            }
        }
    }
}
"#;

pub const CREATE_REMOTE_NETWORK: &str = r#"
mutation CreateRemoteNetwork($name: String!, $isActive: Boolean) {
    remoteNetworkCreate(name: $name, isActive: $isActive) {
        ok
        error
        entity {
            id
            name
            isActive
            createdAt
            updatedAt
        }
    }
}
"#;

pub const UPDATE_REMOTE_NETWORK: &str = r#"
mutation UpdateRemoteNetwork($id: ID!, $name: String, $isActive: Boolean) {
    remoteNetworkUpdate(id: $id, name: $name, isActive: $isActive) {
        ok
        error
        entity {
            id
            name
            isActive
            createdAt
            updatedAt
        }
    }
}
"#;

pub const DELETE_REMOTE_NETWORK: &str = r#"
mutation DeleteRemoteNetwork($id: ID!) {
    remoteNetworkDelete(id: $id) {
        ok
        error
    }
}
"#;

// Resources
pub const GET_RESOURCES: &str = r#"
query GetResources($after: String, $first: Int) {
    resources(after: $after, first: $first) {
        edges {
            node {
                id
                name
                address {
                    value
                }
                isActive
                createdAt
                updatedAt
                remoteNetwork {
                    id
                    name
                }
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_RESOURCE: &str = r#"
query GetResource($id: ID!) {
    resource(id: $id) {
        id
        name
        address {
            value
        }
        isActive
        createdAt
        updatedAt
        remoteNetwork {
            id
            name
        }
        protocols {
            allowIcmp
            tcp {
                policy
                ports {
                    start
                    end
                }
            }
            udp {
                policy
                ports {
                    start
                    end
                }
            }
        }
        access {
            edges {
                node {
                    ... on Group {
                        id
                        name
                    }
                    ... on ServiceAccount {
                        id
                        name
                    }
                }
            }
        }
    }
}
"#;

pub const CREATE_RESOURCE: &str = r#"
mutation CreateResource($name: String!, $address: String!, $remoteNetworkId: ID!, $isActive: Boolean, $protocols: ProtocolsInput, $groupIds: [ID!], $serviceAccountIds: [ID!]) {
    resourceCreate(
        name: $name
        address: $address
        remoteNetworkId: $remoteNetworkId
        isActive: $isActive
        protocols: $protocols
        groupIds: $groupIds
        serviceAccountIds: $serviceAccountIds
    ) {
        ok
        error
        entity {
            id
            name
            address {
                value
            }
            isActive
            createdAt
            updatedAt
        }
    }
}
"#;

pub const UPDATE_RESOURCE: &str = r#"
mutation UpdateResource($id: ID!, $name: String, $address: String, $remoteNetworkId: ID, $isActive: Boolean, $protocols: ProtocolsInput, $groupIds: [ID!], $serviceAccountIds: [ID!]) {
    resourceUpdate(
        id: $id
        name: $name
        address: $address
        remoteNetworkId: $remoteNetworkId
        isActive: $isActive
        protocols: $protocols
        groupIds: $groupIds
        serviceAccountIds: $serviceAccountIds
    ) {
        ok
        error
        entity {
            id
            name
            address {
                value
            }
            isActive
            createdAt
            updatedAt
        }
    }
}
"#;

pub const DELETE_RESOURCE: &str = r#"
mutation DeleteResource($id: ID!) {
    resourceDelete(id: $id) {
        ok
        error
    }
}
"#;

// Connectors
pub const GET_CONNECTORS: &str = r#"
query GetConnectors($after: String, $first: Int) {
    connectors(after: $after, first: $first) {
        edges {
            node {
                id
                name
                state
                publicIP
                privateIPs
                hostname
                version
                hasStatusNotificationsEnabled
                createdAt
                updatedAt
                remoteNetwork {
                    id
                    name
                }
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_CONNECTOR: &str = r#"
query GetConnector($id: ID!) {
    connector(id: $id) {
        id
        name
        state
        publicIP
        privateIPs
        hostname
        version
        hasStatusNotificationsEnabled
        createdAt
        updatedAt
        remoteNetwork {
            id
            name
        }
    }
}
"#;

pub const CREATE_CONNECTOR: &str = r#"
mutation CreateConnector($remoteNetworkId: ID!, $name: String, $hasStatusNotificationsEnabled: Boolean) {
    connectorCreate(
        remoteNetworkId: $remoteNetworkId
        name: $name
        hasStatusNotificationsEnabled: $hasStatusNotificationsEnabled
    ) {
        ok
        error
        entity {
            id
            name
            state
            createdAt
            updatedAt
        }
    }
}
"#;

pub const UPDATE_CONNECTOR: &str = r#"
mutation UpdateConnector($id: ID!, $name: String, $hasStatusNotificationsEnabled: Boolean) {
    connectorUpdate(
        id: $id
        name: $name
        hasStatusNotificationsEnabled: $hasStatusNotificationsEnabled
    ) {
        ok
        error
        entity {
            id
            name
            state
            hasStatusNotificationsEnabled
            createdAt
            updatedAt
        }
    }
}
"#;

pub const DELETE_CONNECTOR: &str = r#"
mutation DeleteConnector($id: ID!) {
    connectorDelete(id: $id) {
        ok
        error
    }
}
"#;

pub const GENERATE_CONNECTOR_TOKENS: &str = r#"
mutation GenerateConnectorTokens($connectorId: ID!) {
    connectorGenerateTokens(connectorId: $connectorId) {
        ok
        error
        connectorTokens {
            accessToken
            refreshToken
        }
    }
}
"#;

// Groups
pub const GET_GROUPS: &str = r#"
query GetGroups($after: String, $first: Int) {
    groups(after: $after, first: $first) {
        edges {
            node {
                id
                name
                type
                isActive
                createdAt
                updatedAt
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_GROUP: &str = r#"
query GetGroup($id: ID!) {
    group(id: $id) {
        id
        name
        type
        isActive
        createdAt
        updatedAt
        users {
            edges {
                node {
                    id
                    email
                    firstName
                    lastName
                }
            }
        }
        resources {
            edges {
                node {
                    id
                    name
                }
            }
        }
    }
}
"#;

pub const CREATE_GROUP: &str = r#"
mutation CreateGroup($name: String!, $userIds: [ID!], $resourceIds: [ID!]) {
    groupCreate(name: $name, userIds: $userIds, resourceIds: $resourceIds) {
        ok
        error
        entity {
            id
            name
            type
            isActive
            createdAt
            updatedAt
        }
    }
}
"#;

pub const UPDATE_GROUP: &str = r#"
mutation UpdateGroup($id: ID!, $name: String, $isActive: Boolean, $addedUserIds: [ID!], $removedUserIds: [ID!], $addedResourceIds: [ID!], $removedResourceIds: [ID!]) {
    groupUpdate(
        id: $id
        name: $name
        isActive: $isActive
        addedUserIds: $addedUserIds
        removedUserIds: $removedUserIds
        addedResourceIds: $addedResourceIds
        removedResourceIds: $removedResourceIds
    ) {
        ok
        error
        entity {
            id
            name
            type
            isActive
            createdAt
            updatedAt
        }
    }
}
"#;

pub const DELETE_GROUP: &str = r#"
mutation DeleteGroup($id: ID!) {
    groupDelete(id: $id) {
        ok
        error
    }
}
"#;

// Users
pub const GET_USERS: &str = r#"
query GetUsers($after: String, $first: Int) {
    users(after: $after, first: $first) {
        edges {
            node {
                id
                email
                firstName
                lastName
                role
                state
                createdAt
                updatedAt
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_USER: &str = r#"
query GetUser($id: ID!) {
    user(id: $id) {
        id
        email
        firstName
        lastName
        role
        state
        createdAt
        updatedAt
        groups {
            edges {
                node {
                    id
                    name
                }
            }
        }
    }
}
"#;

pub const UPDATE_USER: &str = r#"
mutation UpdateUser($id: ID!, $firstName: String, $lastName: String, $role: UserRole, $state: UserStateUpdateInput) {
    userUpdate(id: $id, firstName: $firstName, lastName: $lastName, role: $role, state: $state) {
        ok
        error
        entity {
            id
            email
            firstName
            lastName
            role
            state
        }
    }
}
"#;

pub const DELETE_USER: &str = r#"
mutation DeleteUser($id: ID!) {
    userDelete(id: $id) {
        ok
        error
    }
}
"#;

// Service Accounts
pub const GET_SERVICE_ACCOUNTS: &str = r#"
query GetServiceAccounts($after: String, $first: Int) {
    serviceAccounts(after: $after, first: $first) {
        edges {
            node {
                id
                name
                createdAt
                updatedAt
                keys {
                    edges {
                        node {
                            id
                            name
                            status
                            createdAt
                            expiresAt
                        }
                    }
                }
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_SERVICE_ACCOUNT: &str = r#"
query GetServiceAccount($id: ID!) {
    serviceAccount(id: $id) {
        id
        name
        createdAt
        updatedAt
        resources {
            edges {
                node {
                    id
                    name
                }
            }
        }
        keys {
            edges {
                node {
                    id
                    name
                    status
                    createdAt
                    expiresAt
                }
            }
        }
    }
}
"#;

pub const CREATE_SERVICE_ACCOUNT: &str = r#"
mutation CreateServiceAccount($name: String!, $resourceIds: [ID!]) {
    serviceAccountCreate(name: $name, resourceIds: $resourceIds) {
        ok
        error
        entity {
            id
            name
            createdAt
            updatedAt
        }
    }
}
"#;

pub const UPDATE_SERVICE_ACCOUNT: &str = r#"
mutation UpdateServiceAccount($id: ID!, $name: String, $addedResourceIds: [ID!], $removedResourceIds: [ID!]) {
    serviceAccountUpdate(
        id: $id
        name: $name
        addedResourceIds: $addedResourceIds
        removedResourceIds: $removedResourceIds
    ) {
        ok
        error
        entity {
            id
            name
            createdAt
            updatedAt
        }
    }
}
"#;

pub const DELETE_SERVICE_ACCOUNT: &str = r#"
mutation DeleteServiceAccount($id: ID!) {
    serviceAccountDelete(id: $id) {
        ok
        error
    }
}
"#;

pub const CREATE_SERVICE_KEY: &str = r#"
mutation CreateServiceKey($serviceAccountId: ID!, $name: String!, $expirationTime: Int) {
    serviceAccountKeyCreate(
        serviceAccountId: $serviceAccountId
        name: $name
        expirationTime: $expirationTime
    ) {
        ok
        error
        entity {
            id
            name
            status
            token
            createdAt
            expiresAt
        }
    }
}
"#;

pub const REVOKE_SERVICE_KEY: &str = r#"
mutation RevokeServiceKey($id: ID!) {
    serviceAccountKeyRevoke(id: $id) {
        ok
        error
    }
}
"#;

// Devices
pub const GET_DEVICES: &str = r#"
query GetDevices($after: String, $first: Int) {
    devices(after: $after, first: $first) {
        edges {
            node {
                id
                name
                deviceType
                osName
                osVersion
                clientVersion
                isTrusted
                lastConnectedAt
                user {
                    id
                    email
                    firstName
                    lastName
                }
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_DEVICE: &str = r#"
query GetDevice($id: ID!) {
    device(id: $id) {
        id
        name
        deviceType
        osName
        osVersion
        clientVersion
        isTrusted
        lastConnectedAt
        user {
            id
            email
            firstName
            lastName
        }
    }
}
"#;

pub const UPDATE_DEVICE_TRUST: &str = r#"
mutation UpdateDeviceTrust($id: ID!, $isTrusted: Boolean!) {
    deviceUpdate(id: $id, isTrusted: $isTrusted) {
        ok
        error
        entity {
            id
            name
            isTrusted
        }
    }
}
"#;

// Security Policies
pub const GET_SECURITY_POLICIES: &str = r#"
query GetSecurityPolicies($after: String, $first: Int) {
    securityPolicies(after: $after, first: $first) {
        edges {
            node {
                id
                name
                policyType
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_SECURITY_POLICY: &str = r#"
query GetSecurityPolicy($id: ID!) {
    securityPolicy(id: $id) {
        id
        name
        policyType
    }
}
"#;
