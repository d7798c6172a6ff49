//! Live-database scenarios for the generic repository.
//!
//! These tests need a running PostgreSQL instance, configured through the
//! usual `DB_*` environment variables, and recreate their tables on every
//! run. They are ignored by default; run them with
//! `cargo test -- --ignored --test-threads=1`.

use registro::prelude::*;

#[derive(Debug, Clone, FromRow)]
struct Usuario {
    id: i32,
    nome: String,
    #[allow(dead_code)]
    email: Option<String>,
    ativo: bool,
}

impl Entity for Usuario {
    type Id = i32;

    fn entity_name() -> &'static str {
        "Usuario"
    }

    fn table_name() -> &'static str {
        "registro_live_usuarios"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "nome", "email", "ativo"]
    }

    fn schema() -> &'static [(&'static str, &'static str)] {
        &[
            ("id", "SERIAL PRIMARY KEY"),
            ("nome", "TEXT NOT NULL"),
            ("email", "TEXT UNIQUE"),
            ("ativo", "BOOLEAN NOT NULL DEFAULT TRUE"),
        ]
    }

    fn active_column() -> Option<&'static str> {
        Some("ativo")
    }

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, FromRow)]
struct Marcador {
    id: i32,
    #[allow(dead_code)]
    rotulo: String,
}

impl Entity for Marcador {
    type Id = i32;

    fn entity_name() -> &'static str {
        "Marcador"
    }

    fn table_name() -> &'static str {
        "registro_live_marcadores"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "rotulo"]
    }

    fn schema() -> &'static [(&'static str, &'static str)] {
        &[("id", "SERIAL PRIMARY KEY"), ("rotulo", "TEXT NOT NULL")]
    }

    fn id(&self) -> i32 {
        self.id
    }
}

async fn setup() -> Registro {
    let config = DatabaseConfig::from_env().expect("valid DB_* environment");
    let registro = Registro::new(&config).await.expect("database reachable");
    registro
        .auto_migrate::<Usuario>(true)
        .await
        .expect("usuarios table");
    registro
        .auto_migrate::<Marcador>(true)
        .await
        .expect("marcadores table");
    registro
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn created_entities_are_active_and_visible() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    let criado = usuarios
        .create(&mut session, &Fields::new().set("nome", "Ana"))
        .await
        .unwrap();
    assert!(criado.ativo);

    let lido = usuarios.get(&mut session, &criado.id, false).await.unwrap();
    assert_eq!(lido.map(|u| u.nome), Some("Ana".to_string()));
    assert!(usuarios.exists(&mut session, &criado.id, false).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn soft_delete_hides_but_keeps_the_row() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    let criado = usuarios
        .create(&mut session, &Fields::new().set("nome", "Ana"))
        .await
        .unwrap();
    assert!(usuarios.delete(&mut session, &criado.id).await.unwrap());

    assert!(usuarios.get(&mut session, &criado.id, false).await.unwrap().is_none());
    assert!(!usuarios.exists(&mut session, &criado.id, false).await.unwrap());

    let inativo = usuarios
        .get(&mut session, &criado.id, true)
        .await
        .unwrap()
        .expect("row still present");
    assert!(!inativo.ativo);

    // Deleting again targets no active row
    let repetido = usuarios.delete(&mut session, &criado.id).await;
    assert!(matches!(repetido, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn delete_is_refused_without_active_column() {
    let registro = setup().await;
    let marcadores = registro.repository::<Marcador>();
    let mut session = registro.session().await.unwrap();

    let criado = marcadores
        .create(&mut session, &Fields::new().set("rotulo", "urgente"))
        .await
        .unwrap();

    // Refused uniformly, whether the id exists or not
    let existente = marcadores.delete(&mut session, &criado.id).await;
    assert!(matches!(existente, Err(StoreError::QueryFailed { .. })));
    let ausente = marcadores.delete(&mut session, &999_999).await;
    assert!(matches!(ausente, Err(StoreError::QueryFailed { .. })));

    // The row is untouched
    assert!(marcadores.exists(&mut session, &criado.id, false).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn update_missing_id_is_not_found() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    let resultado = usuarios
        .update(&mut session, &999_999, &Fields::new().set("nome", "Bia"))
        .await;
    assert!(matches!(resultado, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn update_ignores_unknown_fields() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    let criado = usuarios
        .create(&mut session, &Fields::new().set("nome", "Ana"))
        .await
        .unwrap();

    let inalterado = usuarios
        .update(&mut session, &criado.id, &Fields::new().set("campo_fantasma", 1))
        .await
        .unwrap();
    assert_eq!(inalterado.nome, criado.nome);

    let atualizado = usuarios
        .update(
            &mut session,
            &criado.id,
            &Fields::new().set("nome", "Bia").set("campo_fantasma", 1),
        )
        .await
        .unwrap();
    assert_eq!(atualizado.nome, "Bia");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn unknown_filter_key_matches_unfiltered_list() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    for nome in ["Ana", "Bia", "Caio"] {
        usuarios
            .create(&mut session, &Fields::new().set("nome", nome))
            .await
            .unwrap();
    }

    let todos = usuarios
        .get_all(&mut session, Page::default(), false)
        .await
        .unwrap();
    let filtrado = usuarios
        .filter(
            &mut session,
            &Fields::new().set("campo_fantasma", 1),
            Page::default(),
            false,
        )
        .await
        .unwrap();
    assert_eq!(todos.len(), filtrado.len());

    let so_ana = usuarios
        .filter(
            &mut session,
            &Fields::new().set("nome", "Ana"),
            Page::default(),
            false,
        )
        .await
        .unwrap();
    assert_eq!(so_ana.len(), 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn pagination_partitions_without_gaps_or_duplicates() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    for i in 0..5 {
        usuarios
            .create(&mut session, &Fields::new().set("nome", format!("U{i}")))
            .await
            .unwrap();
    }

    let mut vistos = std::collections::HashSet::new();
    for skip in (0..6i64).step_by(2) {
        let pagina = usuarios
            .get_all(&mut session, Page::new(skip, 2), false)
            .await
            .unwrap();
        for usuario in pagina {
            assert!(vistos.insert(usuario.id), "duplicate across pages");
        }
    }
    assert_eq!(vistos.len(), 5);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn count_agrees_with_materialized_list() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    for nome in ["Ana", "Ana", "Bia"] {
        usuarios
            .create(&mut session, &Fields::new().set("nome", nome))
            .await
            .unwrap();
    }
    usuarios
        .create(&mut session, &Fields::new().set("nome", "Ana").set("ativo", false))
        .await
        .unwrap();

    let filtro = Fields::new().set("nome", "Ana");
    let contagem = usuarios.count(&mut session, &filtro, false).await.unwrap();
    let lista = usuarios
        .filter(&mut session, &filtro, Page::new(0, 10_000), false)
        .await
        .unwrap();
    assert_eq!(contagem, lista.len() as i64);
    assert_eq!(contagem, 2);

    let com_inativos = usuarios.count(&mut session, &filtro, true).await.unwrap();
    assert_eq!(com_inativos, 3);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn create_many_rolls_back_whole_batch_on_duplicate() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    let lote = vec![
        Fields::new().set("nome", "Ana").set("email", "ana@example.com"),
        Fields::new().set("nome", "Bia").set("email", "ana@example.com"),
    ];
    let resultado = usuarios.create_many(&mut session, &lote).await;

    // The raw driver error surfaces for batch failures
    assert!(matches!(resultado, Err(StoreError::Driver(_))));
    let restantes = usuarios.count(&mut session, &Fields::new(), true).await.unwrap();
    assert_eq!(restantes, 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn create_many_persists_all_rows_on_success() {
    let registro = setup().await;
    let usuarios = registro.repository::<Usuario>();
    let mut session = registro.session().await.unwrap();

    let lote = vec![
        Fields::new().set("nome", "Ana"),
        Fields::new().set("nome", "Bia"),
    ];
    let criados = usuarios.create_many(&mut session, &lote).await.unwrap();
    assert_eq!(criados.len(), 2);
    assert_eq!(
        usuarios.count(&mut session, &Fields::new(), false).await.unwrap(),
        2
    );
}
