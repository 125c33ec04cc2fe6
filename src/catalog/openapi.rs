use serde_json::{json, Value};
use crate::core::domain::Configuration;
use crate::core::library::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};

fn operation(summary: &str, description: &str, responses: Value) -> Value {
    json!({
        "tags": ["book-controller"],
        "summary": summary,
        "description": description,
        "responses": responses,
    })
}

fn id_parameter() -> Value {
    json!({"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}})
}

fn query_parameter(name: &str, schema: Value) -> Value {
    json!({"name": name, "in": "query", "required": false, "schema": schema})
}

fn text_response(description: &str) -> Value {
    json!({"description": description, "content": {"text/plain": {"schema": {"type": "string"}}}})
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({"description": description, "content": {"application/json": {"schema": schema}}})
}

fn book_body() -> Value {
    json!({"required": true, "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Book"}}}})
}

/// Builds the OpenAPI 3 description of the `/books` resource served at `/api-docs`.
pub(crate) fn openapi_document(config: &Configuration) -> Value {
    let book_ref = json!({"$ref": "#/components/schemas/Book"});

    let mut list = operation("Get all books", "Fetches a list of all books from the database",
                             json!({"200": json_response("OK", json!({"type": "array", "items": book_ref}))}));
    list["operationId"] = json!("getAllBooks");

    let mut add = operation("Add a new book", "Adds a new book to the database",
                            json!({"200": text_response("Book added successfully"),
                                   "400": text_response("Book with the same ID already exists")}));
    add["operationId"] = json!("addBook");
    add["requestBody"] = book_body();

    let mut get = operation("Get a book by ID", "Fetches a book by its ID",
                            json!({"200": json_response("OK", book_ref.clone()),
                                   "404": text_response("Book not found")}));
    get["operationId"] = json!("getBook");
    get["parameters"] = json!([id_parameter()]);

    let mut update = operation("Update an existing book", "Updates the details of an existing book",
                               json!({"200": text_response("Book updated successfully"),
                                      "404": text_response("Book not found")}));
    update["operationId"] = json!("updateBook");
    update["parameters"] = json!([id_parameter()]);
    update["requestBody"] = book_body();

    let mut delete = operation("Delete a book by ID", "Deletes a book from the database by its ID",
                               json!({"200": text_response("Book deleted successfully"),
                                      "404": text_response("Book not found")}));
    delete["operationId"] = json!("deleteBook");
    delete["parameters"] = json!([id_parameter()]);

    let mut paginated = operation("Get paginated and sorted books", "Fetches books with pagination and sorting",
                                  json!({"200": json_response("OK", json!({"$ref": "#/components/schemas/PageBook"})),
                                         "400": text_response("Invalid paging or sorting parameter")}));
    paginated["operationId"] = json!("getPaginatedAndSortedBooks");
    paginated["parameters"] = json!([
        query_parameter("page", json!({"type": "integer", "format": "int32", "default": DEFAULT_PAGE})),
        query_parameter("size", json!({"type": "integer", "format": "int32", "default": DEFAULT_PAGE_SIZE})),
        query_parameter("sortBy", json!({"type": "string", "default": DEFAULT_SORT_BY})),
        query_parameter("direction", json!({"type": "string", "default": "asc", "enum": ["asc", "desc"]})),
    ]);

    json!({
        "openapi": "3.0.1",
        "info": {
            "title": config.api_title,
            "version": config.api_version,
            "description": config.api_description,
        },
        "paths": {
            "/books": {"get": list, "post": add},
            "/books/{id}": {"get": get, "put": update, "delete": delete},
            "/books/paginated": {"get": paginated},
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "required": ["id", "title"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "title": {"type": "string"},
                        "author": {"type": "string", "nullable": true},
                        "isbn": {"type": "string", "nullable": true},
                        "publishedYear": {"type": "integer", "format": "int32", "nullable": true},
                        "version": {"type": "integer", "format": "int64", "readOnly": true},
                        "createdAt": {"type": "string", "format": "date-time", "readOnly": true},
                        "updatedAt": {"type": "string", "format": "date-time", "readOnly": true},
                    },
                },
                "PageBook": {
                    "type": "object",
                    "properties": {
                        "content": {"type": "array", "items": {"$ref": "#/components/schemas/Book"}},
                        "number": {"type": "integer"},
                        "size": {"type": "integer"},
                        "totalElements": {"type": "integer"},
                        "totalPages": {"type": "integer"},
                        "numberOfElements": {"type": "integer"},
                        "first": {"type": "boolean"},
                        "last": {"type": "boolean"},
                        "empty": {"type": "boolean"},
                        "sort": {
                            "type": "object",
                            "properties": {
                                "property": {"type": "string"},
                                "direction": {"type": "string"},
                            },
                        },
                    },
                },
            },
        },
    })
}
