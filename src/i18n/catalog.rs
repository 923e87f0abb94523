use super::Locale;

/// Every message a caller can see in an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    MissingToken,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    RequestTimeout,
    UpstreamTimeout,
    Unexpected,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        use Locale::*;
        use Message::*;

        match (self, locale) {
            (MissingToken, En) => "Request missing token.",
            (MissingToken, Es) => "Falta el token en la solicitud.",
            (MissingToken, Fr) => "Jeton manquant dans la requête.",
            (MissingToken, Pt) => "Token ausente na requisição.",
            (MissingToken, De) => "Token fehlt in der Anfrage.",

            (NotFound, En) => "Not found",
            (NotFound, Es) => "No encontrado",
            (NotFound, Fr) => "Introuvable",
            (NotFound, Pt) => "Não encontrado",
            (NotFound, De) => "Nicht gefunden",

            (MethodNotAllowed, En) => "Method not allowed",
            (MethodNotAllowed, Es) => "Método no permitido",
            (MethodNotAllowed, Fr) => "Méthode non autorisée",
            (MethodNotAllowed, Pt) => "Método não permitido",
            (MethodNotAllowed, De) => "Methode nicht erlaubt",

            (PayloadTooLarge, En) => "Request body too large",
            (PayloadTooLarge, Es) => "Cuerpo de la solicitud demasiado grande",
            (PayloadTooLarge, Fr) => "Corps de requête trop volumineux",
            (PayloadTooLarge, Pt) => "Corpo da requisição muito grande",
            (PayloadTooLarge, De) => "Anfragetext zu groß",

            (RequestTimeout, En) => "Request timed out",
            (RequestTimeout, Es) => "La solicitud agotó el tiempo de espera",
            (RequestTimeout, Fr) => "La requête a expiré",
            (RequestTimeout, Pt) => "A requisição excedeu o tempo limite",
            (RequestTimeout, De) => "Zeitüberschreitung der Anfrage",

            (UpstreamTimeout, En) => "Upstream service timed out",
            (UpstreamTimeout, Es) => "El servicio remoto agotó el tiempo de espera",
            (UpstreamTimeout, Fr) => "Le service distant n'a pas répondu à temps",
            (UpstreamTimeout, Pt) => "O serviço remoto excedeu o tempo limite",
            (UpstreamTimeout, De) => "Zeitüberschreitung beim Upstream-Dienst",

            (Unexpected, En) => "An unexpected error occurred",
            (Unexpected, Es) => "Se produjo un error inesperado",
            (Unexpected, Fr) => "Une erreur inattendue s'est produite",
            (Unexpected, Pt) => "Ocorreu um erro inesperado",
            (Unexpected, De) => "Ein unerwarteter Fehler ist aufgetreten",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_text() {
        assert_eq!(Message::MissingToken.text(Locale::En), "Request missing token.");
        assert_eq!(Message::MissingToken.text(Locale::Pt), "Token ausente na requisição.");
    }
}
