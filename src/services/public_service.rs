// src/services/public_service.rs

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    common::{error::AppError, url_utils::normalize_url},
    db::PublicStore,
    models::public::{PublicLink, PublicPage},
};

// Bug conhecido do front: um id indefinido vira a string "undefined" na URL
const UNDEFINED_SENTINEL: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Id vazio ou "undefined": rejeitado antes de consultar o banco.
    Invalid,
    /// Link inexistente ou desativado. Os dois casos são indistinguíveis para o visitante.
    Unavailable,
    Redirect(String),
}

/// Resultado do redirecionamento. `click` é a tarefa de registro do clique: quem responde ao
/// visitante simplesmente descarta o handle (a tarefa segue sozinha).
pub struct Redirection {
    pub outcome: RedirectOutcome,
    pub click: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct PublicService {
    store: Arc<dyn PublicStore>,
}

impl PublicService {
    pub fn new(store: Arc<dyn PublicStore>) -> Self {
        Self { store }
    }

    /// Compõe o micro-site de uma localidade: igreja -> localidade -> links ativos.
    ///
    /// Qualquer falha de busca vira `NotFound`; o motivo fica só na mensagem interna.
    pub async fn resolve_page(&self, org_slug: &str, location_slug: &str) -> Result<PublicPage, AppError> {
        if org_slug.trim().is_empty() || location_slug.trim().is_empty() {
            return Err(AppError::NotFound("Slug inválido.".into()));
        }

        let organization = match self.store.find_organization_by_slug(org_slug).await {
            Ok(Some(org)) => org,
            Ok(None) => return Err(AppError::NotFound("Igreja não encontrada.".into())),
            Err(e) => {
                tracing::warn!("Falha ao buscar igreja '{}': {}", org_slug, e);
                return Err(AppError::NotFound(e.to_string()));
            }
        };

        let location = match self
            .store
            .find_location_by_slug(organization.id, location_slug)
            .await
        {
            Ok(Some(location)) => location,
            Ok(None) => return Err(AppError::NotFound("Localidade não encontrada.".into())),
            Err(e) => {
                tracing::warn!("Falha ao buscar localidade '{}': {}", location_slug, e);
                return Err(AppError::NotFound(e.to_string()));
            }
        };

        // Sem links é uma página válida (vazia), não um erro
        let active = self
            .store
            .list_active_links(location.id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Falha ao listar links da localidade {}: {}", location.id, e);
                Vec::new()
            });

        let (featured, links) = partition_featured(active);

        Ok(PublicPage {
            organization,
            location,
            featured,
            links,
        })
    }

    /// Resolve `/r/{id}`: busca o link, dispara o registro do clique e devolve o destino.
    pub async fn resolve_redirect(&self, raw_id: &str) -> Redirection {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() || raw_id == UNDEFINED_SENTINEL {
            return Redirection {
                outcome: RedirectOutcome::Invalid,
                click: None,
            };
        }

        let unavailable = Redirection {
            outcome: RedirectOutcome::Unavailable,
            click: None,
        };

        let Ok(id) = Uuid::parse_str(raw_id) else {
            return unavailable;
        };

        let target = match self.store.find_link_target(id).await {
            Ok(Some(target)) if target.is_active => target,
            Ok(_) => return unavailable,
            Err(e) => {
                tracing::warn!("Falha ao buscar link {}: {}", id, e);
                return unavailable;
            }
        };

        // Fail-open: erro no log de cliques nunca altera o redirecionamento
        let store = self.store.clone();
        let (link_id, location_id) = (target.id, target.location_id);
        let click = tokio::spawn(async move {
            if let Err(e) = store.record_click(link_id, location_id).await {
                tracing::warn!("Clique do link {} não registrado: {}", link_id, e);
            }
        });

        Redirection {
            outcome: RedirectOutcome::Redirect(normalize_url(&target.url)),
            click: Some(click),
        }
    }
}

/// Separa os links em destaque (com `featured_type`) dos demais, preservando a ordem.
pub fn partition_featured(links: Vec<PublicLink>) -> (Vec<PublicLink>, Vec<PublicLink>) {
    links.into_iter().partition(|l| l.featured_type.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::public_repo::memory::MemoryPublicStore, models::link::FeaturedType};

    fn service(store: Arc<MemoryPublicStore>) -> PublicService {
        PublicService::new(store)
    }

    async fn finish(redirection: Redirection) -> RedirectOutcome {
        if let Some(click) = redirection.click {
            click.await.unwrap();
        }
        redirection.outcome
    }

    #[tokio::test]
    async fn resolves_active_links_in_sort_order() {
        let store = Arc::new(MemoryPublicStore::default());
        let org = store.add_organization("graca", None);
        let sede = store.add_location(org, "sede");
        let second = store.add_link(sede, "Segundo", "b.com", 2, None);
        let first = store.add_link(sede, "Primeiro", "a.com", 1, None);

        let page = service(store.clone()).resolve_page("graca", "sede").await.unwrap();
        let ids: Vec<Uuid> = page.links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![first, second]);

        // Desativar um não mexe na ordem do outro
        store.set_active(first, false);
        let page = service(store).resolve_page("graca", "sede").await.unwrap();
        let ids: Vec<Uuid> = page.links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second]);
    }

    #[tokio::test]
    async fn featured_links_go_to_their_own_band() {
        let store = Arc::new(MemoryPublicStore::default());
        let org = store.add_organization("graca", None);
        let sede = store.add_location(org, "sede");
        store.add_link(sede, "Oferta", "pix.com", 1, None);
        let insta = store.add_link(sede, "Instagram", "instagram.com/graca", 2, Some(FeaturedType::Instagram));

        let page = service(store).resolve_page("graca", "sede").await.unwrap();
        assert_eq!(page.featured.len(), 1);
        assert_eq!(page.featured[0].id, insta);
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].title, "Oferta");
    }

    #[tokio::test]
    async fn missing_slugs_or_rows_are_not_found() {
        let store = Arc::new(MemoryPublicStore::default());
        let org = store.add_organization("graca", None);
        store.add_location(org, "sede");
        let svc = service(store);

        for (o, l, reason) in [
            ("", "sede", "Slug inválido."),
            ("graca", "", "Slug inválido."),
            ("outra", "sede", "Igreja não encontrada."),
            ("graca", "filial", "Localidade não encontrada."),
        ] {
            match svc.resolve_page(o, l).await {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, reason),
                other => panic!("esperava NotFound, veio {:?}", other.map(|p| p.location.slug)),
            }
        }
    }

    #[tokio::test]
    async fn every_redirect_logs_exactly_one_click() {
        let store = Arc::new(MemoryPublicStore::default());
        let org = store.add_organization("graca", None);
        let sede = store.add_location(org, "sede");
        let link = store.add_link(sede, "Site", "graca.org", 1, None);
        let svc = service(store.clone());

        for _ in 0..3 {
            let outcome = finish(svc.resolve_redirect(&link.to_string()).await).await;
            assert_eq!(outcome, RedirectOutcome::Redirect("https://graca.org".into()));
        }

        let clicks = store.clicks();
        assert_eq!(clicks.len(), 3);
        assert!(clicks.iter().all(|c| *c == (link, sede)));
    }

    #[tokio::test]
    async fn inactive_or_unknown_links_never_redirect_nor_log() {
        let store = Arc::new(MemoryPublicStore::default());
        let org = store.add_organization("graca", None);
        let sede = store.add_location(org, "sede");
        let link = store.add_link(sede, "Site", "https://graca.org", 1, None);
        store.set_active(link, false);
        let svc = service(store.clone());

        for id in [link.to_string(), Uuid::new_v4().to_string(), "nao-e-uuid".to_string()] {
            let redirection = svc.resolve_redirect(&id).await;
            assert!(redirection.click.is_none());
            assert_eq!(redirection.outcome, RedirectOutcome::Unavailable);
        }
        assert!(store.clicks().is_empty());
    }

    #[tokio::test]
    async fn undefined_sentinel_is_rejected_up_front() {
        let svc = service(Arc::new(MemoryPublicStore::default()));
        assert_eq!(svc.resolve_redirect("undefined").await.outcome, RedirectOutcome::Invalid);
        assert_eq!(svc.resolve_redirect("").await.outcome, RedirectOutcome::Invalid);
    }

    #[tokio::test]
    async fn click_log_failure_does_not_block_redirect() {
        let store = Arc::new(MemoryPublicStore::with_failing_clicks());
        let org = store.add_organization("graca", None);
        let sede = store.add_location(org, "sede");
        let link = store.add_link(sede, "Site", "graca.org", 1, None);

        let outcome = finish(service(store.clone()).resolve_redirect(&link.to_string()).await).await;
        assert_eq!(outcome, RedirectOutcome::Redirect("https://graca.org".into()));
        assert!(store.clicks().is_empty());
    }
}
