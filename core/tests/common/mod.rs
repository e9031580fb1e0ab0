use oasgate_core::{Description, JsonSchemaEngine, ResolvedDescription};

pub const ITEMS_API: &str = r##"
swagger: "2.0"
basePath: /api
paths:
  /items/{SCOPE}/{item_id}:
    parameters:
      - name: SCOPE
        in: path
        required: true
        type: string
      - name: item_id
        in: path
        required: true
        type: string
    post:
      operationId: createItem
      parameters:
        - name: item_id
          in: path
          required: true
          type: integer
        - name: X-Request-Id
          in: header
          required: true
          type: string
        - name: Latitude
          in: query
          required: true
          type: number
        - name: longitude
          in: query
          required: true
          type: number
        - name: payload
          in: body
          required: true
          schema:
            type: object
            required: [foo]
            properties:
              foo:
                type: object
                required: [bar]
                properties:
                  bar:
                    type: integer
      responses:
        "201":
          description: created
          headers:
            X-Item-Id:
              type: integer
          schema:
            $ref: "#/definitions/Item"
        default:
          description: error
          schema:
            $ref: "#/definitions/Error"
  /items:
    get:
      operationId: listItems
      parameters:
        - name: tags
          in: query
          type: array
          items:
            type: string
        - name: ids
          in: query
          type: array
          collectionFormat: pipes
          items:
            type: integer
        - name: filter
          in: query
          type: string
          allowEmptyValue: true
        - name: limit
          in: query
          type: integer
          maximum: 100
      responses:
        "200":
          description: ok
          schema:
            type: array
            items:
              $ref: "#/definitions/Item"
  /things:
    parameters:
      - name: version
        in: query
        required: true
        type: string
    post:
      operationId: createThing
      parameters:
        - name: version
          in: query
          type: integer
        - name: thing
          in: body
          required: true
          schema:
            $ref: "#/definitions/Item"
      responses:
        "204":
          description: stored
definitions:
  Item:
    type: object
    discriminator: type
    required: [type]
    properties:
      type:
        type: string
      note:
        type: string
        x-nullable: true
  Foo:
    allOf:
      - type: object
        required: [foo]
        properties:
          foo:
            type: string
      - $ref: "#/definitions/Item"
  Bar:
    allOf:
      - type: object
        required: [bar]
        properties:
          bar:
            type: integer
            minimum: 0
      - $ref: "#/definitions/Item"
  Error:
    type: object
    required: [message]
    properties:
      message:
        type: string
"##;

pub fn resolved() -> ResolvedDescription {
    let description = Description::from_yaml_str(ITEMS_API).unwrap();
    ResolvedDescription::build(&description, &JsonSchemaEngine::new()).unwrap()
}
